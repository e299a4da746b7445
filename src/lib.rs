pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod settings;
pub mod storage;
pub mod transform;
pub mod utils;

pub use agent::{Agent, AgentDraft, AgentStore};
pub use config::{AppConfig, DataPaths};
pub use error::{PilotError, Result};
pub use session::{History, HistoryEntry, Session};
pub use settings::{ProviderId, ProviderSettings};
pub use storage::LocalStore;
pub use transform::{
    OptimizationMode, Optimizer, OutputFormat, format_output, optimize, optimize_label, rewrite,
};
