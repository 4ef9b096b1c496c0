//! Error types for the VrISA console core

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for console operations
#[derive(Error, Debug)]
pub enum Error {
    /// A create or submit operation received an incomplete or
    /// out-of-range field set; the attempted entity is discarded
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a position no longer present in its
    /// collection
    #[error("{entity} not found at index {index}")]
    NotFound {
        /// Kind of entity that was addressed
        entity: String,
        /// Position that failed to resolve
        index: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, index: usize) -> Self {
        Self::NotFound {
            entity: entity.into(),
            index,
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
