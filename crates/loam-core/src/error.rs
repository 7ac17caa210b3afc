//! Error types for loam-core

use thiserror::Error;

/// Result type alias using loam-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in loam-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Storage location failed validation
    #[error("Invalid storage location: {0}")]
    InvalidLocation(String),

    /// Underlying read/write failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Stored document could not be parsed or encoded
    #[error("Serialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}
