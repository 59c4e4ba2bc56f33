//! Application orchestration for quoted-reply alignment
//!
//! This crate loads source/reply message pairs, runs them through the core
//! alignment pipeline sequentially or in parallel, and writes the results
//! to the export sinks.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod executor;
pub mod export;
pub mod input;
pub mod processor;

// Re-export key types
pub use config::{AlignmentMode, EngineConfig};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use export::{ExportSinks, SourceLineExporter, TagLineExporter, TaggedExporter, WriteMode};
pub use input::{ManifestEntry, MessagePair, PairManifest};
pub use processor::{
    BatchOutput, BatchProcessor, BatchProcessorBuilder, BatchSummary, PairAligner, PairFailure,
    PairOutput,
};

// Re-export from core for convenience
pub use replyalign_core::{AlignConfig, AlignedMessage, AlignmentReport, Diagnostic, Tag};
