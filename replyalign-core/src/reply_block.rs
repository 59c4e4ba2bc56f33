//! Detection of quoted-reply lines
//!
//! Positions are grouped into lines closed by a reply-side token that ends in
//! the line separator. A line is quoted when it opens with the reply marker
//! and enough of its positions match the source, or when it is the short
//! tail of a quoted line that a quoted-printable soft break wrapped.

use crate::aligner::AlignmentResult;
use crate::config::AlignConfig;
use crate::report::{AlignmentReport, Diagnostic};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Alignment positions classified as quoted content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyBlockPositionSet {
    positions: BTreeSet<usize>,
}

impl ReplyBlockPositionSet {
    /// Whether `position` belongs to a quoted line
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Number of quoted positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is quoted
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Quoted positions in increasing order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    fn insert_line(&mut self, line: RangeInclusive<usize>) {
        self.positions.extend(line);
    }
}

impl FromIterator<usize> for ReplyBlockPositionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// State threaded through the single forward pass
#[derive(Debug, Default)]
struct LineState {
    starts_with_marker: bool,
    previous_line_was_reply_line: bool,
    line_start: usize,
    line_len: usize,
    aligned_in_line: usize,
}

impl LineState {
    fn open_next_line(&mut self, start: usize, accepted: bool) {
        self.previous_line_was_reply_line = accepted;
        self.starts_with_marker = false;
        self.line_start = start;
        self.line_len = 0;
        self.aligned_in_line = 0;
    }
}

/// Marks alignment positions that belong to quoted-reply lines
#[derive(Debug, Clone, Copy)]
pub struct ReplyBlockDetector<'a> {
    config: &'a AlignConfig,
}

impl<'a> ReplyBlockDetector<'a> {
    /// Create a detector using `config`'s markers and thresholds
    pub fn new(config: &'a AlignConfig) -> Self {
        Self { config }
    }

    /// Classify every position of `alignment`
    ///
    /// A quoted line left open by the end of the sequence is dropped and
    /// counted as [`Diagnostic::UnterminatedReplyLine`].
    pub fn detect(
        &self,
        alignment: &AlignmentResult,
        report: &mut AlignmentReport,
    ) -> ReplyBlockPositionSet {
        let mut blocks = ReplyBlockPositionSet::default();
        let mut state = LineState::default();

        for (position, slot) in alignment.slots().iter().enumerate() {
            state.line_len += 1;
            if slot.matches_ignore_case() {
                state.aligned_in_line += 1;
            }

            let Some(reply) = slot.reference.as_ref() else {
                continue;
            };

            if self.config.is_reply_marker(&reply.text) {
                if position == 0 || self.ends_line_at(alignment, position - 1) {
                    state.starts_with_marker = true;
                }
            } else if self.config.ends_line(&reply.text) {
                let accepted = self.accept_line(alignment, &state);
                if accepted {
                    blocks.insert_line(state.line_start..=position);
                }
                state.open_next_line(position + 1, accepted);
            }
        }

        if state.line_len > 0 && state.starts_with_marker {
            log::warn!(
                "last token is not a line separator, dropping the open quoted line at position {}",
                state.line_start
            );
            report.record(Diagnostic::UnterminatedReplyLine);
        }

        blocks
    }

    fn accept_line(&self, alignment: &AlignmentResult, state: &LineState) -> bool {
        if state.starts_with_marker {
            let ratio = state.aligned_in_line as f64 / state.line_len as f64;
            return ratio >= self.config.acceptance_ratio;
        }

        // continuation of a quoted line wrapped by a trailing "="
        state.previous_line_was_reply_line
            && state.line_len < self.config.soft_wrap_max_tokens
            && state.line_start >= 2
            && alignment
                .reference(state.line_start - 2)
                .is_some_and(|t| t.text.starts_with(self.config.soft_wrap_marker.as_str()))
    }

    fn ends_line_at(&self, alignment: &AlignmentResult, position: usize) -> bool {
        alignment
            .reference(position)
            .is_some_and(|t| self.config.ends_line(&t.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::SequenceAligner;
    use crate::token::{SimpleTokenizer, Tokenizer};

    fn detect(
        reply: &str,
        source: &str,
    ) -> (AlignmentResult, ReplyBlockPositionSet, AlignmentReport) {
        let config = AlignConfig::default();
        let reply = SimpleTokenizer.tokenize(reply);
        let source = SimpleTokenizer.tokenize(source);
        let alignment = SequenceAligner.align(&reply, &source);
        let mut report = AlignmentReport::new();
        let blocks = ReplyBlockDetector::new(&config).detect(&alignment, &mut report);
        (alignment, blocks, report)
    }

    #[test]
    fn test_marked_matching_line_is_quoted() {
        let (alignment, blocks, report) = detect("> hello\nthanks\n", "hello\n");

        // ">" "hello" "\n" are quoted, "thanks" "\n" are not
        assert_eq!(alignment.len(), 5);
        assert_eq!(blocks.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_unmarked_line_is_not_quoted() {
        let (_, blocks, _) = detect("hello\n", "hello\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_marked_line_below_ratio_is_rejected() {
        let (_, blocks, _) = detect("> something else entirely\n", "hello\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_ratio_at_threshold_is_accepted() {
        // ">" and "b" do not match: 2 of 4 positions aligned
        let (alignment, blocks, _) = detect("> a b\n", "a x\n");
        assert_eq!(alignment.len(), 4);
        assert_eq!(blocks.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_marker_must_open_the_line() {
        let (_, blocks, _) = detect("hello > world\n", "hello world\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_soft_wrapped_continuation_is_quoted() {
        let source = "me connecte=\nr =E0\nnouveau\n";
        let reply = "> me connecte=\nr =E0\n> nouveau\nok\n";
        let (alignment, blocks, _) = detect(reply, source);

        let quoted: Vec<&str> = blocks
            .iter()
            .filter_map(|p| alignment.reference(p))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(
            quoted,
            vec![">", "me", "connecte", "=", "\n", "r", "=", "E0", "\n", ">", "nouveau", "\n"]
        );
    }

    #[test]
    fn test_continuation_after_rejected_line_is_not_quoted() {
        let source = "hello=\nr\n";
        let reply = "> foo bar baz qux=\nr\n";
        let (alignment, blocks, _) = detect(reply, source);

        // the soft break is in place, but the marked line itself was rejected
        assert_eq!(alignment.reference(5).map(|t| t.text.as_str()), Some("="));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_short_line_without_soft_break_is_not_quoted() {
        let (_, blocks, _) = detect("> me connecte\nr\n", "me connecte\nr\n");
        assert_eq!(blocks.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_long_continuation_is_not_quoted() {
        let source = "me connecte=\nun deux trois quatre cinq six sept huit neuf dix\n";
        let reply = "> me connecte=\nun deux trois quatre cinq six sept huit neuf dix\n";
        let (alignment, blocks, _) = detect(reply, source);

        let first_line_end = 4;
        assert!(blocks.contains(first_line_end));
        assert!(!blocks.contains(first_line_end + 1));
        assert_eq!(blocks.len(), 5);
        assert_eq!(alignment.len(), 16);
    }

    #[test]
    fn test_unterminated_quoted_line_is_dropped() {
        let (_, blocks, report) = detect("> hello", "hello");
        assert!(blocks.is_empty());
        assert_eq!(report.count(Diagnostic::UnterminatedReplyLine), 1);
    }

    #[test]
    fn test_unterminated_plain_line_is_silent() {
        let (_, _, report) = detect("> hello\nbye", "hello\n");
        assert!(report.is_clean());
    }

    #[test]
    fn test_case_insensitive_alignment_counts() {
        let (_, blocks, _) = detect("> HELLO World\n", "hello world\n");
        assert_eq!(blocks.len(), 4);
    }
}
