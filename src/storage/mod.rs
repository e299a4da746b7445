//! Local key-value persistence.
//!
//! - `LocalStore`: one pretty-printed JSON document per key in a data directory

mod local;

pub use local::LocalStore;
