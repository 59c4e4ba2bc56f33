//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor, ProgressFn},
    input::MessagePair,
    processor::{PairAligner, PairOutcome},
};
use rayon::prelude::*;

/// Parallel multi-threaded executor
///
/// Every pair is aligned independently with its own report, so workers share
/// nothing but the read-only aligner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create an executor; `None` runs on the global rayon pool
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    fn run(
        pairs: &[MessagePair],
        aligner: &PairAligner,
        on_done: ProgressFn<'_>,
    ) -> Vec<PairOutcome> {
        pairs
            .par_iter()
            .map(|pair| {
                let outcome = aligner.align_outcome(pair);
                on_done();
                outcome
            })
            .collect()
    }
}

impl Executor for ParallelExecutor {
    fn execute(
        &self,
        pairs: &[MessagePair],
        aligner: &PairAligner,
        on_done: ProgressFn<'_>,
    ) -> Result<Vec<PairOutcome>> {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ThreadPoolError(e.to_string()))?;
                log::debug!("running {} pair(s) on {threads} thread(s)", pairs.len());
                Ok(pool.install(|| Self::run(pairs, aligner, on_done)))
            }
            None => Ok(Self::run(pairs, aligner, on_done)),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
