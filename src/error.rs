//! Domain-specific error types for poster-engine

use thiserror::Error;

/// Main error type for the poster generation core
#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Renderer error: {message}")]
    Renderer { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for PosterError {
    fn from(err: anyhow::Error) -> Self {
        PosterError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PosterError {
    fn from(err: serde_json::Error) -> Self {
        PosterError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PosterError {
    fn from(err: reqwest::Error) -> Self {
        PosterError::Renderer {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

/// Result type alias for poster-engine operations
pub type Result<T> = std::result::Result<T, PosterError>;
