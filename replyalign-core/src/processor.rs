//! Message-level orchestration of the alignment stages

use crate::aligner::SequenceAligner;
use crate::boundary::SentenceBoundaryDetector;
use crate::config::AlignConfig;
use crate::error::Result;
use crate::line_aligner::{LineAligner, LinePair};
use crate::projector::OriginalCaseProjector;
use crate::reply_block::ReplyBlockDetector;
use crate::reply_only::ReplyOnlyAligner;
use crate::report::{AlignmentReport, Diagnostic};
use crate::tagger::{LineTagger, Tag};
use crate::token::{collapse_blank_lines, SimpleTokenizer, Token, Tokenizer};
use std::borrow::Cow;

/// Token-level figures of one edit-distance alignment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentStats {
    /// Alignment positions
    pub positions: usize,
    /// Source tokens
    pub source_tokens: usize,
    /// Reply tokens
    pub reply_tokens: usize,
    /// Paired positions whose text differs
    pub mismatches: usize,
    /// Edit distance
    pub distance: usize,
    /// Positions classified as quoted
    pub quoted_positions: usize,
}

/// A line pair with its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedLine<'a> {
    /// Positional tag
    pub tag: Tag,
    /// Source side text
    pub source: Option<&'a str>,
    /// Reply side text
    pub reply: Option<&'a str>,
}

impl TaggedLine<'_> {
    /// Whether both sides are present
    pub fn is_aligned(&self) -> bool {
        self.source.is_some() && self.reply.is_some()
    }
}

/// Final artifact of aligning one source/reply pair
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedMessage {
    pairs: Vec<LinePair>,
    tags: Vec<Tag>,
    report: AlignmentReport,
    stats: Option<AlignmentStats>,
}

impl AlignedMessage {
    fn new(pairs: Vec<LinePair>, report: AlignmentReport, stats: Option<AlignmentStats>) -> Self {
        let tags = LineTagger.tag(&pairs);
        Self {
            pairs,
            tags,
            report,
            stats,
        }
    }

    /// Line pairs in order
    pub fn pairs(&self) -> &[LinePair] {
        &self.pairs
    }

    /// One tag per line pair
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Diagnostics recorded while aligning
    pub fn report(&self) -> &AlignmentReport {
        &self.report
    }

    /// Token-level figures; `None` for reply-only alignments
    pub fn stats(&self) -> Option<&AlignmentStats> {
        self.stats.as_ref()
    }

    /// (tag, source, reply) triples in order
    pub fn lines(&self) -> impl Iterator<Item = TaggedLine<'_>> {
        self.pairs.iter().zip(&self.tags).map(|(pair, tag)| TaggedLine {
            tag: *tag,
            source: pair.source(),
            reply: pair.reply(),
        })
    }

    /// Number of pairs with both sides present
    pub fn aligned_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_aligned()).count()
    }

    /// Number of line pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no line pair was produced
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Aligns a reply message against the message it replies to
///
/// # Example
///
/// ```rust
/// use replyalign_core::{MessageAligner, Tag};
///
/// let aligner = MessageAligner::new();
/// let message = aligner
///     .align_texts("See you at noon.\n", "> See you at noon.\nGreat, thanks!\n")
///     .unwrap();
///
/// let tags: Vec<Tag> = message.tags().to_vec();
/// assert_eq!(tags, vec![Tag::BE, Tag::O]);
/// ```
#[derive(Debug, Clone)]
pub struct MessageAligner<T: Tokenizer = SimpleTokenizer> {
    config: AlignConfig,
    tokenizer: T,
}

impl MessageAligner<SimpleTokenizer> {
    /// Create an aligner with the default configuration and tokenizer
    pub fn new() -> Self {
        Self {
            config: AlignConfig::default(),
            tokenizer: SimpleTokenizer,
        }
    }

    /// Create an aligner with a custom configuration
    pub fn with_config(config: AlignConfig) -> Result<Self> {
        Self::with_tokenizer(config, SimpleTokenizer)
    }
}

impl Default for MessageAligner<SimpleTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> MessageAligner<T> {
    /// Create an aligner with a custom configuration and tokenizer
    pub fn with_tokenizer(config: AlignConfig, tokenizer: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, tokenizer })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Tokenize both bodies and align them
    pub fn align_texts(&self, source: &str, reply: &str) -> Result<AlignedMessage> {
        let source = self.tokenizer.tokenize(&self.preprocess(source));
        let reply = self.tokenizer.tokenize(&self.preprocess(reply));
        self.align_tokens(&source, &reply)
    }

    /// Align already tokenized bodies
    ///
    /// The reply is the reference side of the alignment and the source the
    /// hypothesis side: the reply embeds the source, not the other way round.
    pub fn align_tokens<S: AsRef<str>>(&self, source: &[S], reply: &[S]) -> Result<AlignedMessage> {
        let mut report = AlignmentReport::new();
        if source.is_empty() {
            log::warn!("source message has no tokens");
            report.record(Diagnostic::EmptySource);
        }
        if reply.is_empty() {
            log::warn!("reply message has no tokens");
            report.record(Diagnostic::EmptyReply);
        }

        let source_tokens = Token::sequence(source);
        let alignment =
            SequenceAligner.align_tokens(Token::sequence(reply), source_tokens.clone());
        let projected = OriginalCaseProjector.project(&alignment, &source_tokens)?;

        let blocks = ReplyBlockDetector::new(&self.config).detect(&alignment, &mut report);
        let boundaries = SentenceBoundaryDetector::new(&self.config).detect(&alignment, &blocks);
        if boundaries.has_implicit_final() {
            log::debug!("reply does not end with a line separator");
            report.record(Diagnostic::MissingFinalLineTerminator);
        }

        let pairs = LineAligner.align_lines(&alignment, &projected, &blocks, &boundaries);
        let stats = AlignmentStats {
            positions: alignment.len(),
            source_tokens: alignment.hypothesis_len(),
            reply_tokens: alignment.reference_len(),
            mismatches: alignment.mismatch_count(),
            distance: alignment.distance(),
            quoted_positions: blocks.len(),
        };
        log::debug!(
            "aligned {} positions into {} line pairs ({} quoted positions)",
            stats.positions,
            pairs.len(),
            stats.quoted_positions
        );

        Ok(AlignedMessage::new(pairs, report, Some(stats)))
    }

    /// Align using only the reply's quote markers
    pub fn align_from_reply(&self, reply: &str) -> AlignedMessage {
        let mut report = AlignmentReport::new();
        let reply = self.preprocess(reply);
        if reply.trim().is_empty() {
            log::warn!("reply message is empty");
            report.record(Diagnostic::EmptyReply);
        }
        let pairs = ReplyOnlyAligner::new(&self.config).align_text(&reply);
        AlignedMessage::new(pairs, report, None)
    }

    fn preprocess<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.config.collapse_blank_lines {
            Cow::Owned(collapse_blank_lines(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_then_answer() {
        let message = MessageAligner::new()
            .align_texts("hello.\n", "> hello.\nthanks\n")
            .unwrap();

        assert_eq!(message.tags(), &[Tag::BE, Tag::O]);
        assert_eq!(message.pairs()[0], LinePair::aligned("hello .", "> hello ."));
        assert!(message.pairs()[1].reply().is_none());
        assert!(message.report().is_clean());
    }

    #[test]
    fn test_unterminated_quote_then_answer_is_one_unaligned_line() {
        let message = MessageAligner::new()
            .align_texts("hello\n", "> hello\nthanks\n")
            .unwrap();

        assert_eq!(message.tags(), &[Tag::O]);
        assert_eq!(message.pairs(), &[LinePair::source_only("hello")]);
    }

    #[test]
    fn test_empty_bodies_are_reported() {
        let message = MessageAligner::new().align_texts("", "").unwrap();
        assert!(message.is_empty());
        assert_eq!(message.report().count(Diagnostic::EmptySource), 1);
        assert_eq!(message.report().count(Diagnostic::EmptyReply), 1);
        assert_eq!(message.stats().unwrap().positions, 0);
    }

    #[test]
    fn test_missing_final_terminator_is_reported() {
        let message = MessageAligner::new()
            .align_texts("hello.\n", "> hello.\nthanks")
            .unwrap();
        assert_eq!(
            message.report().count(Diagnostic::MissingFinalLineTerminator),
            1
        );
        assert_eq!(message.tags(), &[Tag::BE, Tag::O]);
    }

    #[test]
    fn test_blank_lines_are_collapsed() {
        let message = MessageAligner::new()
            .align_texts("hello.\n\n\n", "> hello.\n\n\nthanks\n")
            .unwrap();
        assert_eq!(message.len(), 2);
    }

    #[test]
    fn test_reply_only_mode() {
        let message = MessageAligner::new().align_from_reply("> quoted line\nown reply text\n");

        let lines: Vec<_> = message.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tag, Tag::BE);
        assert_eq!(lines[0].source, Some("quoted line"));
        assert_eq!(lines[1].tag, Tag::O);
        assert_eq!(lines[1].source, None);
        assert!(message.stats().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AlignConfig {
            acceptance_ratio: -0.1,
            ..AlignConfig::default()
        };
        assert!(MessageAligner::with_config(config).is_err());
    }

    #[test]
    fn test_custom_tokenizer() {
        struct Whitespace;
        impl Tokenizer for Whitespace {
            fn tokenize(&self, text: &str) -> Vec<String> {
                text.split_inclusive('\n')
                    .flat_map(|line| {
                        let mut words: Vec<String> =
                            line.split_whitespace().map(str::to_string).collect();
                        if line.ends_with('\n') {
                            words.push("\n".to_string());
                        }
                        words
                    })
                    .collect()
            }
        }

        let aligner = MessageAligner::with_tokenizer(AlignConfig::default(), Whitespace).unwrap();
        let message = aligner.align_texts("hi there.\n", "> hi there.\n").unwrap();
        assert_eq!(message.tags(), &[Tag::BE]);
        assert_eq!(message.pairs()[0].source(), Some("hi there."));
    }
}
