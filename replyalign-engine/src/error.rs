//! Layered error types

use replyalign_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors (Application Layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core algorithm error: {0}")]
    Core(#[from] CoreError),

    /// A message file could not be read
    #[error("failed to read {}: {message}", path.display())]
    ReadError {
        /// The file that failed
        path: PathBuf,
        /// Underlying error description
        message: String,
    },

    /// A pair manifest line is malformed
    #[error("{}:{line}: {reason}", path.display())]
    ManifestError {
        /// The manifest file
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// What is wrong with the line
        reason: String,
    },

    /// Dedicated thread pool could not be built
    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPoolError(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::EncodingError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
