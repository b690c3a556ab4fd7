//! Common error types for demostat

use thiserror::Error;

/// Common result type for demostat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the demostat pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External lookup returned no usable data
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input record or field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal processing error
    #[error("Internal error: {0}")]
    Internal(String),
}
