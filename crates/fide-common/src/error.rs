//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for shared FIDE operations
pub type Result<T> = std::result::Result<T, FideError>;

/// Errors raised by the shared helpers
#[derive(Error, Debug)]
pub enum FideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
