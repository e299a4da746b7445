//! Structured command output.
//!
//! - `OutputWriter`: JSON emission for `--output json`
//! - `OptimizeOutput`: result document of an optimize run

mod writer;

pub use writer::{OptimizeOutput, OutputWriter};
