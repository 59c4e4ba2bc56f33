//! Line and sentence ending positions
//!
//! Outside quoted blocks every line end closes a segment. Inside a quoted
//! block the line structure belongs to the quoting client, so segments close
//! on sentence terminators instead, moved onto the following line end when
//! one comes right after. A quoted line without a terminator runs on into
//! whatever follows it.

use crate::aligner::AlignmentResult;
use crate::config::AlignConfig;
use crate::reply_block::ReplyBlockPositionSet;
use std::collections::BTreeSet;

/// Strictly increasing segment end positions
///
/// The last boundary is the last position unless the alignment ends with a
/// line break inside a quoted block that no terminator closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryPositionSet {
    positions: Vec<usize>,
    implicit_final: bool,
}

impl BoundaryPositionSet {
    /// Boundaries in increasing order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of boundaries
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no boundaries
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the last boundary was added because the final token does not
    /// end a line
    pub fn has_implicit_final(&self) -> bool {
        self.implicit_final
    }

    /// Boundaries in increasing order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }
}

/// Computes segment ends from line separators and sentence terminators
#[derive(Debug, Clone, Copy)]
pub struct SentenceBoundaryDetector<'a> {
    config: &'a AlignConfig,
}

impl<'a> SentenceBoundaryDetector<'a> {
    /// Create a detector using `config`'s separator and terminators
    pub fn new(config: &'a AlignConfig) -> Self {
        Self { config }
    }

    /// Compute the boundary set for `alignment` given its quoted positions
    pub fn detect(
        &self,
        alignment: &AlignmentResult,
        blocks: &ReplyBlockPositionSet,
    ) -> BoundaryPositionSet {
        let len = alignment.len();
        if len == 0 {
            return BoundaryPositionSet::default();
        }

        let ends_line = |position: usize| {
            alignment
                .reference(position)
                .is_some_and(|t| self.config.ends_line(&t.text))
        };

        let mut ends: BTreeSet<usize> = (0..len)
            .filter(|&p| !blocks.contains(p) && ends_line(p))
            .collect();

        let mut candidates: Vec<usize> = blocks
            .iter()
            .filter(|&p| {
                alignment
                    .reference(p)
                    .is_some_and(|t| self.config.is_terminator(&t.text))
            })
            .collect();

        let implicit_final = !ends_line(len - 1);
        if implicit_final {
            candidates.push(len - 1);
        }

        for candidate in candidates {
            if candidate + 1 < len && ends_line(candidate + 1) {
                ends.remove(&candidate);
                ends.insert(candidate + 1);
            } else {
                ends.insert(candidate);
            }
        }

        BoundaryPositionSet {
            positions: ends.into_iter().collect(),
            implicit_final,
        }
    }
}
