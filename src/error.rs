use thiserror::Error;

#[derive(Error, Debug)]
pub enum PilotError {
    #[error("Input is empty. Enter some text to optimize.")]
    EmptyInput,

    #[error("No optimization mode selected")]
    ModeRequired,

    #[error("An optimization is already in progress")]
    RequestInFlight,

    #[error("History entry {index} does not exist (history has {len} entries)")]
    HistoryIndex { index: usize, len: usize },

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Model '{model}' is not offered by provider '{provider}'")]
    UnknownModel { provider: String, model: String },

    #[error("Unknown optimization mode: {0}")]
    UnknownMode(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data directory not initialized. Run 'prompt-pilot init' first.")]
    NotInitialized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl PilotError {
    /// Precondition refusals the shell reports as a prompt rather than a failure.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::ModeRequired | Self::RequestInFlight
        )
    }
}

pub type Result<T> = std::result::Result<T, PilotError>;
