//! Command-line interface definitions.
//!
//! - `Cli`, `Commands`: CLI argument definitions via clap
//! - `Display`: Formatted terminal output with colors and spinners
//! - `InteractiveShell`: Line-oriented optimizer session

mod commands;
mod display;
mod interactive;

pub use commands::{AgentAction, AgentFields, Cli, Commands, ConfigAction, OutputMode, ProviderAction};
pub use display::Display;
pub use interactive::{InteractiveShell, ShellCommand};
