//! Configuration types and loading.
//!
//! - `AppConfig`: `config.toml` with optimizer, history and session sections
//! - `DataPaths`: layout of the data directory

mod settings;

pub use settings::{
    AppConfig, CONFIG_FILE, DataPaths, HistoryConfig, OptimizerConfig, SessionConfig,
};
