use thiserror::Error;

/// The main error type for globrun operations
#[derive(Debug, Error)]
pub enum GlobrunError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A supplied pattern matched zero declared task names. The message text
    /// is a compatibility contract: downstream consumers grep for "not found".
    #[error("Task not found: \"{0}\"")]
    NotFound(String),

    #[error("Task error: {0}")]
    Task(String),
}

/// Result type alias for globrun operations
pub type GlobrunResult<T> = Result<T, GlobrunError>;
