//! Projection of original source tokens onto alignment positions

use crate::aligner::AlignmentResult;
use crate::error::{CoreError, Result};
use crate::token::Token;

/// Hypothesis side re-populated from the un-padded original tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedSide<'a> {
    slots: Vec<Option<&'a Token>>,
}

impl<'a> ProjectedSide<'a> {
    /// Number of alignment positions covered
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the projection is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Projected token at `position`
    pub fn get(&self, position: usize) -> Option<&'a Token> {
        self.slots.get(position).copied().flatten()
    }

    /// Projected tokens within `range`, absent positions skipped
    pub fn tokens_in(
        &self,
        range: std::ops::RangeInclusive<usize>,
    ) -> impl Iterator<Item = &'a Token> + '_ {
        let end = (*range.end()).min(self.slots.len().saturating_sub(1));
        let start = *range.start();
        self.slots
            .get(start..=end)
            .unwrap_or(&[])
            .iter()
            .filter_map(|t| *t)
    }
}

/// Walks the aligned hypothesis side and hands out original tokens in order
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginalCaseProjector;

impl OriginalCaseProjector {
    /// Create a new projector
    pub fn new() -> Self {
        Self
    }

    /// Place `original` tokens, in order, on every occupied hypothesis position
    ///
    /// Fails with [`CoreError::ProjectionOverflow`] when the alignment occupies
    /// more hypothesis positions than `original` provides.
    pub fn project<'a>(
        &self,
        alignment: &AlignmentResult,
        original: &'a [Token],
    ) -> Result<ProjectedSide<'a>> {
        let mut remaining = original.iter();
        let mut slots = Vec::with_capacity(alignment.len());

        for (position, hypothesis) in alignment.hypothesis_side().enumerate() {
            let projected = match hypothesis {
                Some(_) => Some(remaining.next().ok_or(CoreError::ProjectionOverflow {
                    position,
                    available: original.len(),
                })?),
                None => None,
            };
            slots.push(projected);
        }

        Ok(ProjectedSide { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::SequenceAligner;

    #[test]
    fn test_projection_follows_hypothesis_positions() {
        let original = Token::sequence(&["Hello", "\n"]);
        let alignment = SequenceAligner.align(&[">", "Hello", "\n"], &["Hello", "\n"]);

        let projected = OriginalCaseProjector.project(&alignment, &original).unwrap();

        assert_eq!(projected.len(), 3);
        assert!(projected.get(0).is_none());
        assert_eq!(projected.get(1).unwrap().text, "Hello");
        assert_eq!(projected.get(2).unwrap().text, "\n");
    }

    #[test]
    fn test_projection_restores_original_text() {
        // the aligned side may differ from what the caller wants shown
        let alignment = SequenceAligner.align(&["bonjour"], &["bonjour"]);
        let original = Token::sequence(&["Bonjour"]);

        let projected = OriginalCaseProjector.project(&alignment, &original).unwrap();
        assert_eq!(projected.get(0).unwrap().text, "Bonjour");
    }

    #[test]
    fn test_projection_overflow_is_an_error() {
        let alignment = SequenceAligner.align(&["a", "b", "c"], &["a", "b", "c"]);
        let original = Token::sequence(&["a", "b"]);

        let err = OriginalCaseProjector
            .project(&alignment, &original)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::ProjectionOverflow {
                position: 2,
                available: 2
            }
        );
    }

    #[test]
    fn test_tokens_in_range_skips_absent() {
        let original = Token::sequence(&["x"]);
        let alignment = SequenceAligner.align(&["w", "x", "y"], &["x"]);
        let projected = OriginalCaseProjector.project(&alignment, &original).unwrap();

        let texts: Vec<&str> = projected.tokens_in(0..=2).map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["x"]);
        assert_eq!(projected.tokens_in(5..=9).count(), 0);
    }
}
