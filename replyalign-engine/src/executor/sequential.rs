//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor, ProgressFn},
    input::MessagePair,
    processor::{PairAligner, PairOutcome},
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        pairs: &[MessagePair],
        aligner: &PairAligner,
        on_done: ProgressFn<'_>,
    ) -> Result<Vec<PairOutcome>> {
        Ok(pairs
            .iter()
            .map(|pair| {
                let outcome = aligner.align_outcome(pair);
                on_done();
                outcome
            })
            .collect())
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
