//! Line-level alignment of quoted email replies against their source message
//!
//! A reply that quotes its source rewraps, re-marks and sometimes recases the
//! quoted text. This crate recovers which source lines the reply quotes and
//! tags each line with its position inside a quoted block.
//!
//! # Pipeline
//!
//! 1. [`SequenceAligner`] computes a token-level edit-distance alignment of
//!    the reply (reference side) against the source (hypothesis side).
//! 2. [`OriginalCaseProjector`] maps the source side back onto the original
//!    tokens.
//! 3. [`ReplyBlockDetector`] classifies quoted positions line by line.
//! 4. [`SentenceBoundaryDetector`] cuts the alignment into segments.
//! 5. [`LineAligner`] turns segments into [`LinePair`]s.
//! 6. [`LineTagger`] assigns one [`Tag`] per pair.
//!
//! [`MessageAligner`] runs the whole pipeline; [`ReplyOnlyAligner`] handles
//! the degraded case where no source is available.
//!
//! # Example
//!
//! ```rust
//! use replyalign_core::{MessageAligner, Tag};
//!
//! let aligner = MessageAligner::new();
//! let message = aligner
//!     .align_texts(
//!         "Can we meet on Monday? I am free after lunch.\n",
//!         "> Can we meet on Monday? I am free after lunch.\nSure.\n",
//!     )
//!     .unwrap();
//!
//! assert_eq!(message.tags(), &[Tag::B, Tag::E, Tag::O]);
//! assert_eq!(message.pairs()[0].source(), Some("Can we meet on Monday ?"));
//! ```

#![warn(missing_docs)]

pub mod aligner;
pub mod boundary;
pub mod config;
pub mod error;
pub mod line_aligner;
pub mod processor;
pub mod projector;
pub mod reply_block;
pub mod reply_only;
pub mod report;
pub mod tagger;
pub mod token;

pub use aligner::{AlignedSlot, AlignmentResult, EditOp, SequenceAligner};
pub use boundary::{BoundaryPositionSet, SentenceBoundaryDetector};
pub use config::{AlignConfig, AlignConfigBuilder};
pub use error::{CoreError, Result};
pub use line_aligner::{join_tokens, LineAligner, LinePair};
pub use processor::{AlignedMessage, AlignmentStats, MessageAligner, TaggedLine};
pub use projector::{OriginalCaseProjector, ProjectedSide};
pub use reply_block::{ReplyBlockDetector, ReplyBlockPositionSet};
pub use reply_only::ReplyOnlyAligner;
pub use report::{AlignmentReport, Diagnostic};
pub use tagger::{LineTagger, Tag};
pub use token::{collapse_blank_lines, SimpleTokenizer, Token, Tokenizer};
