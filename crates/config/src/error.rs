//! Error types for config store operations.

/// Errors produced while reading or writing config documents.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document name: {0}")]
    InvalidName(String),

    #[error("document {0} is not a JSON object")]
    NotAnObject(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
