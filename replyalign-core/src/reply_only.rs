//! Alignment derived from the reply alone
//!
//! Cheaper fallback to the edit-distance path: every line opening with the
//! reply prefix is taken as quoted source text, every other line as the
//! replier's own.

use crate::config::AlignConfig;
use crate::line_aligner::LinePair;

/// Builds line pairs from reply lines and their quote markers
#[derive(Debug, Clone, Copy)]
pub struct ReplyOnlyAligner<'a> {
    config: &'a AlignConfig,
}

impl<'a> ReplyOnlyAligner<'a> {
    /// Create an aligner using `config`'s reply prefix
    pub fn new(config: &'a AlignConfig) -> Self {
        Self { config }
    }

    /// One pair per line, in order
    pub fn align_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<LinePair> {
        lines
            .iter()
            .map(|line| {
                let line = line.as_ref();
                if self.config.is_reply_marker(line) {
                    LinePair::aligned(self.strip_markers(line), line)
                } else {
                    LinePair::reply_only(line)
                }
            })
            .collect()
    }

    /// Split `text` into lines and align them
    pub fn align_text(&self, text: &str) -> Vec<LinePair> {
        let lines: Vec<&str> = text.lines().collect();
        self.align_lines(&lines)
    }

    fn strip_markers<'l>(&self, line: &'l str) -> &'l str {
        let prefix = self.config.reply_prefix.as_str();
        let mut rest = line;
        loop {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix(' ') {
                rest = stripped;
            } else {
                return rest;
            }
        }
    }
}
