use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::transform::{OptimizationMode, OutputFormat};

#[derive(Parser)]
#[command(name = "prompt-pilot")]
#[command(author, version, about = "Agent presets and a local prompt optimizer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputMode,

    /// Data directory (default: ./.prompt-pilot)
    #[arg(long, global = true, env = "PROMPT_PILOT_HOME")]
    pub data_dir: Option<PathBuf>,
}

/// How command results are printed.
/// - Text: Human-readable text output (default)
/// - Json: One JSON object per result
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory
    Init,

    /// Optimize a prompt once
    Optimize {
        /// Prompt text
        text: String,

        /// Optimization mode (REWRITE_PERFECTLY, CLARIFY, SIMPLIFY, EXPAND, SHORTEN)
        #[arg(short, long)]
        mode: Option<OptimizationMode>,

        /// Output format (Plain Text, Markdown, JSON, XML, Bulleted List, Table)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Take defaults from this agent instead of the active one
        #[arg(long)]
        agent: Option<String>,

        /// Skip the simulated latency
        #[arg(long)]
        no_delay: bool,
    },

    /// Start an interactive optimizer session
    Shell {
        /// Take defaults from this agent instead of the active one
        #[arg(long)]
        agent: Option<String>,
    },

    /// Manage agent presets
    Agents {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Manage provider settings
    Providers {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// List optimization modes
    Modes,

    /// List output formats
    Formats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum AgentAction {
    /// List agents
    List,
    /// Show one agent
    Show { id: String },
    /// Create an agent
    Create {
        #[command(flatten)]
        fields: AgentFields,
    },
    /// Edit an agent (unspecified fields keep their value)
    Edit {
        id: String,
        #[command(flatten)]
        fields: AgentFields,
    },
    /// Delete an agent
    Delete { id: String },
    /// Make an agent the active one
    Select { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AgentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    /// Output format label, or a mode title such as "Rewrite Perfectly"
    #[arg(long)]
    pub format: Option<String>,
    #[arg(long)]
    pub placeholder: Option<String>,
    #[arg(long)]
    pub system_prompt: Option<String>,
}

#[derive(Subcommand)]
pub enum ProviderAction {
    /// Show provider settings
    List,
    /// Enable or disable a provider
    Toggle { provider: String },
    /// Store the API key for a provider
    SetKey { provider: String, key: String },
    /// Choose the default model for a provider
    SetModel { provider: String, model: String },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Reset to defaults
    Reset,
}
