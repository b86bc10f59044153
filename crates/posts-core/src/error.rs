//! Error types for posts-core

use thiserror::Error;

/// Result type alias using posts-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in posts-core operations
///
/// These never cross a public request boundary as `Err`; they are folded into
/// a [`crate::Status`] first.
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
