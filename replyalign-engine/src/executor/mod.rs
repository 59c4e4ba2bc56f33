//! Execution strategies for batches of message pairs

use crate::error::Result;
use crate::input::MessagePair;
use crate::processor::{PairAligner, PairOutcome};
use std::fmt;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

// Re-export executors
#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One pair after the other on the calling thread
    Sequential,
    /// Pairs spread over a worker pool
    Parallel,
    /// Chosen from the batch size
    Adaptive,
}

impl ExecutionMode {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked once per finished pair
pub type ProgressFn<'a> = &'a (dyn Fn() + Sync);

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Align every pair; outcomes are returned in input order
    fn execute(
        &self,
        pairs: &[MessagePair],
        aligner: &PairAligner,
        on_done: ProgressFn<'_>,
    ) -> Result<Vec<PairOutcome>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Resolve `Adaptive` from the number of pairs in the batch
pub fn auto_select(pair_count: usize, threshold: usize) -> ExecutionMode {
    if pair_count < 2 || pair_count < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}
