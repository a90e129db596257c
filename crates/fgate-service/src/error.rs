//! Error types for fgate-service

use thiserror::Error;

/// Main error type for service operations
#[derive(Error, Debug)]
pub enum Error {
    /// The update channel closed before the request completed
    #[error("update handler is gone")]
    HandlerGone,

    /// Store or engine failure
    #[error(transparent)]
    Platform(#[from] fgate_platform::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
