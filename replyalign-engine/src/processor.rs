//! Pair alignment and batch processing

use crate::{
    config::{AlignmentMode, EngineConfig},
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    input::MessagePair,
};
use replyalign_core::{AlignConfig, AlignedMessage, AlignmentReport, MessageAligner};
use std::time::{Duration, Instant};

/// Aligned result of one pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutput {
    /// Pair identifier
    pub id: String,
    /// Line pairs, tags and report
    pub message: AlignedMessage,
}

/// A pair that could not be aligned
#[derive(Debug)]
pub struct PairFailure {
    /// Pair identifier
    pub id: String,
    /// What went wrong
    pub error: EngineError,
}

/// Outcome of aligning a single pair inside a batch
pub type PairOutcome = std::result::Result<PairOutput, PairFailure>;

/// Aligns single pairs in the configured mode
#[derive(Debug, Clone)]
pub struct PairAligner {
    aligner: MessageAligner,
    mode: AlignmentMode,
}

impl PairAligner {
    /// Create a pair aligner
    pub fn new(config: AlignConfig, mode: AlignmentMode) -> Result<Self> {
        Ok(Self {
            aligner: MessageAligner::with_config(config)?,
            mode,
        })
    }

    /// Alignment mode in use
    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    /// Align one pair
    pub fn align(&self, pair: &MessagePair) -> Result<PairOutput> {
        let message = match self.mode {
            AlignmentMode::Wer => self.aligner.align_texts(&pair.source, &pair.reply)?,
            AlignmentMode::ReplyOnly => self.aligner.align_from_reply(&pair.reply),
        };

        for (diagnostic, count) in message.report().iter() {
            log::warn!("{}: {diagnostic} x{count}", pair.id);
        }
        log::debug!(
            "{}: {} line pair(s), {} aligned",
            pair.id,
            message.len(),
            message.aligned_count()
        );

        Ok(PairOutput {
            id: pair.id.clone(),
            message,
        })
    }

    /// Align one pair, turning an error into a logged failure
    pub fn align_outcome(&self, pair: &MessagePair) -> PairOutcome {
        self.align(pair).map_err(|error| {
            log::error!("{}: skipped: {error}", pair.id);
            PairFailure {
                id: pair.id.clone(),
                error,
            }
        })
    }
}

/// Totals over a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Pairs submitted
    pub pairs: usize,
    /// Pairs aligned
    pub succeeded: usize,
    /// Pairs skipped on error
    pub failed: usize,
    /// Line pairs over all aligned pairs
    pub line_pairs: usize,
    /// Line pairs with both sides present
    pub aligned_lines: usize,
    /// Merged diagnostics
    pub report: AlignmentReport,
}

/// Result of processing a batch
#[derive(Debug)]
pub struct BatchOutput {
    /// Aligned pairs in input order
    pub outputs: Vec<PairOutput>,
    /// Skipped pairs in input order
    pub failures: Vec<PairFailure>,
    /// Execution mode actually used
    pub mode_used: ExecutionMode,
    /// Wall-clock time spent aligning
    pub elapsed: Duration,
}

impl BatchOutput {
    fn from_outcomes(
        outcomes: Vec<PairOutcome>,
        mode_used: ExecutionMode,
        elapsed: Duration,
    ) -> Self {
        let mut outputs = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(output) => outputs.push(output),
                Err(failure) => failures.push(failure),
            }
        }
        Self {
            outputs,
            failures,
            mode_used,
            elapsed,
        }
    }

    /// Count a pair that failed before it reached the aligner
    pub fn record_failure(&mut self, id: impl Into<String>, error: EngineError) {
        self.failures.push(PairFailure {
            id: id.into(),
            error,
        });
    }

    /// Fold another batch into this one
    pub fn extend(&mut self, other: BatchOutput) {
        self.outputs.extend(other.outputs);
        self.failures.extend(other.failures);
        self.elapsed += other.elapsed;
    }

    /// Compute the batch totals
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            pairs: self.outputs.len() + self.failures.len(),
            succeeded: self.outputs.len(),
            failed: self.failures.len(),
            ..BatchSummary::default()
        };
        for output in &self.outputs {
            summary.line_pairs += output.message.len();
            summary.aligned_lines += output.message.aligned_count();
            summary.report.merge(output.message.report());
        }
        summary
    }
}

/// Processes batches of pairs with the configured execution strategy
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    aligner: PairAligner,
    config: EngineConfig,
}

impl BatchProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aligner: PairAligner::new(config.align.clone(), config.mode)?,
            config,
        })
    }

    /// Start a builder
    pub fn builder() -> BatchProcessorBuilder {
        BatchProcessorBuilder::new()
    }

    /// Get the current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Align a single pair
    pub fn align_pair(&self, pair: &MessagePair) -> Result<PairOutput> {
        self.aligner.align(pair)
    }

    /// Align every pair of a batch
    pub fn process(&self, pairs: &[MessagePair]) -> Result<BatchOutput> {
        self.process_with_progress(pairs, &|| {})
    }

    /// Align every pair of a batch, calling `on_done` after each pair
    pub fn process_with_progress(
        &self,
        pairs: &[MessagePair],
        on_done: &(dyn Fn() + Sync),
    ) -> Result<BatchOutput> {
        let mode = self.resolve_mode(pairs.len());
        let executor = self.executor(mode);
        log::info!("aligning {} pair(s) ({mode})", pairs.len());

        let start = Instant::now();
        let outcomes = executor.execute(pairs, &self.aligner, on_done)?;
        let output = BatchOutput::from_outcomes(outcomes, executor.mode(), start.elapsed());

        log::info!(
            "aligned {} pair(s), {} failed, in {:.1?}",
            output.outputs.len(),
            output.failures.len(),
            output.elapsed
        );
        Ok(output)
    }

    fn resolve_mode(&self, pair_count: usize) -> ExecutionMode {
        match self.config.execution_mode {
            ExecutionMode::Adaptive => auto_select(pair_count, self.config.parallel_threshold),
            mode => mode,
        }
    }

    fn executor(&self, mode: ExecutionMode) -> Box<dyn Executor> {
        match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                Box::new(crate::executor::ParallelExecutor::new(self.config.threads))
            }
            _ => Box::new(SequentialExecutor),
        }
    }
}

/// Builder for BatchProcessor
#[derive(Debug, Default)]
pub struct BatchProcessorBuilder {
    config: EngineConfig,
}

impl BatchProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-message alignment configuration
    pub fn align_config(mut self, align: AlignConfig) -> Self {
        self.config.align = align;
        self
    }

    /// Set the alignment mode
    pub fn mode(mut self, mode: AlignmentMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.threads = count;
        self
    }

    /// Set the pair count above which adaptive execution goes parallel
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<BatchProcessor> {
        BatchProcessor::with_config(self.config)
    }
}
