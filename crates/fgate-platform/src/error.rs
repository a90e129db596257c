//! Error types for fgate-platform

use thiserror::Error;

/// Main error type for store and engine operations
#[derive(Error, Debug)]
pub enum Error {
    /// Preference store failure
    #[error("Preference store error for '{path}': {message}")]
    Store {
        /// Store location
        path: String,
        /// Error message
        message: String,
    },

    /// Rule engine rejected an update
    #[error("Rule engine error: {0}")]
    Engine(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a store error
    pub fn store(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an engine error
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}
