//! Shared utility functions.
//!
//! - String truncation and one-line previews (UTF-8 safe)

mod string;

pub use string::{preview, truncate_chars};
