//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::ExecutionMode;
use replyalign_core::AlignConfig;
use std::fmt;
use std::str::FromStr;

/// How a pair is aligned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignmentMode {
    /// Edit-distance alignment of the reply against the source
    #[default]
    Wer,
    /// Quote markers of the reply only; the source is not read
    ReplyOnly,
}

impl AlignmentMode {
    /// All modes, in display order
    pub const ALL: [AlignmentMode; 2] = [AlignmentMode::Wer, AlignmentMode::ReplyOnly];

    /// Identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentMode::Wer => "wer",
            AlignmentMode::ReplyOnly => "reply-only",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            AlignmentMode::Wer => "edit-distance alignment of the reply against its source",
            AlignmentMode::ReplyOnly => "quote markers of the reply only, no source needed",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wer" => Ok(AlignmentMode::Wer),
            "reply-only" | "reply_only" | "replyonly" => Ok(AlignmentMode::ReplyOnly),
            other => Err(EngineError::ConfigError(format!(
                "unknown alignment mode '{other}', expected 'wer' or 'reply-only'"
            ))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Per-message alignment settings
    pub align: AlignConfig,
    /// Alignment mode
    pub mode: AlignmentMode,
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Pair count above which adaptive execution goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            align: AlignConfig::default(),
            mode: AlignmentMode::Wer,
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 64,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            ..Self::default()
        }
    }

    /// Parallel configuration using `threads` workers (None = all cores)
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            threads,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.align.validate()?;
        if self.threads == Some(0) {
            return Err(EngineError::ConfigError(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
