//! Error types for the model graph engine

use thiserror::Error;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Model graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Definition document not found: {0}")]
    MissingDefinition(String),

    #[error("Malformed definition document {name}: {reason}")]
    MalformedDefinition { name: String, reason: String },

    #[error("Document is not valid JSON at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
