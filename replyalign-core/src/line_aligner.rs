//! Partition of an alignment into source/reply line pairs

use crate::aligner::AlignmentResult;
use crate::boundary::BoundaryPositionSet;
use crate::projector::ProjectedSide;
use crate::reply_block::ReplyBlockPositionSet;
use crate::token::Token;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n]+").expect("whitespace pattern is valid"));

/// One aligned or unaligned line; at least one side is present
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinePair {
    source: Option<String>,
    reply: Option<String>,
}

impl LinePair {
    /// Pair whose source line is quoted by the reply line
    pub fn aligned(source: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            reply: Some(reply.into()),
        }
    }

    /// Source line with no quoting reply line
    pub fn source_only(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            reply: None,
        }
    }

    /// Reply line quoting nothing from the source
    pub fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            source: None,
            reply: Some(reply.into()),
        }
    }

    /// Source side text
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Reply side text
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    /// Whether both sides are present
    pub fn is_aligned(&self) -> bool {
        self.source.is_some() && self.reply.is_some()
    }
}

/// Builds line pairs from segment boundaries and quoted positions
#[derive(Debug, Clone, Copy, Default)]
pub struct LineAligner;

impl LineAligner {
    /// Create a new line aligner
    pub fn new() -> Self {
        Self
    }

    /// Emit one pair per segment, in segment order
    ///
    /// A segment whose end position is quoted yields an aligned pair; any
    /// other segment keeps its source text and leaves the reply side absent.
    /// Positions after the last boundary form a final segment ending at the
    /// last position, so every position lands in exactly one segment.
    pub fn align_lines(
        &self,
        alignment: &AlignmentResult,
        projected: &ProjectedSide<'_>,
        blocks: &ReplyBlockPositionSet,
        boundaries: &BoundaryPositionSet,
    ) -> Vec<LinePair> {
        let len = alignment.len();
        let mut pairs = Vec::with_capacity(boundaries.len() + 1);
        let mut start = 0;

        let tail = boundaries
            .positions()
            .last()
            .map_or(len > 0, |&last| last + 1 < len)
            .then(|| len - 1);

        for end in boundaries.iter().chain(tail) {
            let reply_line = join_tokens((start..=end).filter_map(|p| alignment.reference(p)));
            let source_line = join_tokens(projected.tokens_in(start..=end));

            if blocks.contains(end) {
                pairs.push(LinePair::aligned(source_line, reply_line));
            } else {
                pairs.push(LinePair::source_only(source_line));
            }
            start = end + 1;
        }

        pairs
    }
}

/// Join tokens with single spaces, collapsing line breaks and whitespace runs
pub fn join_tokens<'t>(tokens: impl Iterator<Item = &'t Token>) -> String {
    let joined = tokens
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
}
