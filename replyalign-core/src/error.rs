//! Core error types
//!
//! Only conditions the algorithm cannot recover from are errors. Data-quality
//! problems (empty bodies, missing line terminators) are counted in
//! [`AlignmentReport`](crate::report::AlignmentReport) instead.

use thiserror::Error;

/// Core algorithm errors (no I/O, no external failures)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// More hypothesis positions are occupied than there are original tokens
    /// to project onto them
    #[error(
        "projection overflow at alignment position {position}: \
         only {available} original tokens available"
    )]
    ProjectionOverflow {
        /// Alignment position that found no original token left
        position: usize,
        /// Number of original tokens supplied
        available: usize,
    },

    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Whether this error reports a broken internal invariant rather than bad
    /// caller input
    pub fn is_internal(&self) -> bool {
        matches!(self, CoreError::ProjectionOverflow { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
