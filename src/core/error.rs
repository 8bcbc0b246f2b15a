use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown rule kind: {0}")]
    UnknownRule(String),

    #[error("Proposal failed: {0}")]
    Proposal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Fallback catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineError {
    /// Whether the orchestrator may spend another attempt after this error
    pub fn is_retryable(&self) -> bool {
        !matches!(self, EngineError::UnknownRule(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
