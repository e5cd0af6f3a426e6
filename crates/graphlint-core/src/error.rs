use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphLintError {
    #[error("adapter error: {0}")]
    Adapter(String),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphLintError>;
