//! Per-call diagnostic counters
//!
//! Every alignment call returns its own report so parallel workers never share
//! mutable counters; batch drivers merge reports afterwards.

use std::collections::BTreeMap;
use std::fmt;

/// Non-fatal data-quality conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Diagnostic {
    /// Source body produced no tokens
    EmptySource,
    /// Reply body produced no tokens
    EmptyReply,
    /// Last token does not end a line
    MissingFinalLineTerminator,
    /// A quoted line was still open when the tokens ran out
    UnterminatedReplyLine,
}

impl Diagnostic {
    /// Every diagnostic kind, in report order
    pub const ALL: [Diagnostic; 4] = [
        Diagnostic::EmptySource,
        Diagnostic::EmptyReply,
        Diagnostic::MissingFinalLineTerminator,
        Diagnostic::UnterminatedReplyLine,
    ];

    /// Stable counter name
    pub fn name(&self) -> &'static str {
        match self {
            Diagnostic::EmptySource => "empty_source",
            Diagnostic::EmptyReply => "empty_reply",
            Diagnostic::MissingFinalLineTerminator => "missing_final_line_terminator",
            Diagnostic::UnterminatedReplyLine => "unterminated_reply_line",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named diagnostic counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentReport {
    counters: BTreeMap<Diagnostic, usize>,
}

impl AlignmentReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter for `diagnostic`
    pub fn record(&mut self, diagnostic: Diagnostic) {
        *self.counters.entry(diagnostic).or_insert(0) += 1;
    }

    /// Current value of a counter
    pub fn count(&self, diagnostic: Diagnostic) -> usize {
        self.counters.get(&diagnostic).copied().unwrap_or(0)
    }

    /// Sum of all counters
    pub fn total(&self) -> usize {
        self.counters.values().sum()
    }

    /// Whether nothing was recorded
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero counters in report order
    pub fn iter(&self) -> impl Iterator<Item = (Diagnostic, usize)> + '_ {
        self.counters.iter().map(|(d, c)| (*d, *c))
    }

    /// Add another report's counters to this one
    pub fn merge(&mut self, other: &AlignmentReport) {
        for (diagnostic, count) in other.iter() {
            *self.counters.entry(diagnostic).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut report = AlignmentReport::new();
        assert!(report.is_clean());

        report.record(Diagnostic::EmptyReply);
        report.record(Diagnostic::EmptyReply);
        report.record(Diagnostic::UnterminatedReplyLine);

        assert_eq!(report.count(Diagnostic::EmptyReply), 2);
        assert_eq!(report.count(Diagnostic::EmptySource), 0);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_merge() {
        let mut left = AlignmentReport::new();
        left.record(Diagnostic::EmptySource);
        let mut right = AlignmentReport::new();
        right.record(Diagnostic::EmptySource);
        right.record(Diagnostic::MissingFinalLineTerminator);

        left.merge(&right);
        assert_eq!(left.count(Diagnostic::EmptySource), 2);
        assert_eq!(left.count(Diagnostic::MissingFinalLineTerminator), 1);
    }

    #[test]
    fn test_names_are_stable() {
        let names: Vec<String> = Diagnostic::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "empty_source",
                "empty_reply",
                "missing_final_line_terminator",
                "unterminated_reply_line"
            ]
        );
    }
}
