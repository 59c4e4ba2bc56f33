//! Global edit-distance alignment of two token sequences
//!
//! Word-error-rate style: every substitution, insertion and deletion costs one,
//! matches are free. Tokens are compared on their lower-cased form; a pair that
//! only differs in case is aligned as a match but still flagged as a mismatch.
//! When several optimal paths exist the backtrace prefers match, then
//! substitution, then insertion, then deletion.
//!
//! Sides follow the WER convention: an *insertion* is a hypothesis token with
//! no reference counterpart (reference side absent), a *deletion* is a
//! reference token with no hypothesis counterpart (hypothesis side absent).

use crate::token::Token;

/// Edit operation at one alignment position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditOp {
    /// Tokens equal ignoring case
    Match,
    /// Different tokens on both sides
    Substitution,
    /// Hypothesis token only
    Insertion,
    /// Reference token only
    Deletion,
}

/// One alignment position; never absent on both sides
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedSlot {
    /// Reference token, absent at insertions
    pub reference: Option<Token>,
    /// Hypothesis token, absent at deletions
    pub hypothesis: Option<Token>,
    /// Operation that produced this slot
    pub op: EditOp,
}

impl AlignedSlot {
    /// Whether the two sides hold identical tokens
    pub fn is_exact_match(&self) -> bool {
        match (&self.reference, &self.hypothesis) {
            (Some(r), Some(h)) => r.text == h.text,
            _ => false,
        }
    }

    /// Whether both sides are present but their original text differs
    pub fn is_mismatch(&self) -> bool {
        self.reference.is_some() && self.hypothesis.is_some() && !self.is_exact_match()
    }

    /// Whether both sides are present and equal ignoring case
    pub fn matches_ignore_case(&self) -> bool {
        match (&self.reference, &self.hypothesis) {
            (Some(r), Some(h)) => r.matches(h),
            _ => false,
        }
    }
}

/// Ordered alignment of a reference sequence against a hypothesis sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentResult {
    slots: Vec<AlignedSlot>,
    reference_len: usize,
    hypothesis_len: usize,
}

impl AlignmentResult {
    /// Number of alignment positions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether both inputs were empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of the original reference sequence
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    /// Length of the original hypothesis sequence
    pub fn hypothesis_len(&self) -> usize {
        self.hypothesis_len
    }

    /// All positions in order
    pub fn slots(&self) -> &[AlignedSlot] {
        &self.slots
    }

    /// Slot at `position`
    pub fn slot(&self, position: usize) -> Option<&AlignedSlot> {
        self.slots.get(position)
    }

    /// Reference token at `position`, `None` when absent or out of range
    pub fn reference(&self, position: usize) -> Option<&Token> {
        self.slots.get(position).and_then(|s| s.reference.as_ref())
    }

    /// Hypothesis token at `position`, `None` when absent or out of range
    pub fn hypothesis(&self, position: usize) -> Option<&Token> {
        self.slots.get(position).and_then(|s| s.hypothesis.as_ref())
    }

    /// Reference side as a padded array
    pub fn reference_side(&self) -> impl Iterator<Item = Option<&Token>> {
        self.slots.iter().map(|s| s.reference.as_ref())
    }

    /// Hypothesis side as a padded array
    pub fn hypothesis_side(&self) -> impl Iterator<Item = Option<&Token>> {
        self.slots.iter().map(|s| s.hypothesis.as_ref())
    }

    /// Number of positions with the given operation
    pub fn count(&self, op: EditOp) -> usize {
        self.slots.iter().filter(|s| s.op == op).count()
    }

    /// Number of paired positions whose original text differs
    pub fn mismatch_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_mismatch()).count()
    }

    /// Total edit distance
    pub fn distance(&self) -> usize {
        self.slots.iter().filter(|s| s.op != EditOp::Match).count()
    }

    /// Edit distance relative to the reference length (0 for an empty reference)
    pub fn word_error_rate(&self) -> f64 {
        if self.reference_len == 0 {
            return 0.0;
        }
        self.distance() as f64 / self.reference_len as f64
    }
}

/// Minimum edit-distance aligner
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAligner;

impl SequenceAligner {
    /// Create a new aligner
    pub fn new() -> Self {
        Self
    }

    /// Align raw token strings
    pub fn align<S: AsRef<str>>(&self, reference: &[S], hypothesis: &[S]) -> AlignmentResult {
        self.align_tokens(Token::sequence(reference), Token::sequence(hypothesis))
    }

    /// Align already-built token sequences
    pub fn align_tokens(&self, reference: Vec<Token>, hypothesis: Vec<Token>) -> AlignmentResult {
        let n = reference.len();
        let m = hypothesis.len();
        let width = m + 1;

        // cost[i * width + j]: distance between reference[i..] and hypothesis[j..].
        // Tracing forward from (0, 0) applies the tie-break to the earliest
        // positions, so repeated tokens pair with their first occurrence.
        let mut cost = vec![0u32; (n + 1) * width];
        for j in 0..=m {
            cost[n * width + j] = (m - j) as u32;
        }
        for i in (0..n).rev() {
            cost[i * width + m] = (n - i) as u32;
            for j in (0..m).rev() {
                let diagonal = cost[(i + 1) * width + j + 1]
                    + u32::from(!reference[i].matches(&hypothesis[j]));
                let down = cost[(i + 1) * width + j] + 1;
                let right = cost[i * width + j + 1] + 1;
                cost[i * width + j] = diagonal.min(down).min(right);
            }
        }

        let mut ops = Vec::with_capacity(n.max(m));
        let (mut i, mut j) = (0, 0);
        while i < n || j < m {
            let here = cost[i * width + j];
            if i < n && j < m {
                let diagonal = cost[(i + 1) * width + j + 1];
                let same = reference[i].matches(&hypothesis[j]);
                if same && here == diagonal {
                    ops.push(EditOp::Match);
                    i += 1;
                    j += 1;
                    continue;
                }
                if !same && here == diagonal + 1 {
                    ops.push(EditOp::Substitution);
                    i += 1;
                    j += 1;
                    continue;
                }
            }
            if j < m && here == cost[i * width + j + 1] + 1 {
                ops.push(EditOp::Insertion);
                j += 1;
            } else {
                ops.push(EditOp::Deletion);
                i += 1;
            }
        }

        let mut reference = reference.into_iter();
        let mut hypothesis = hypothesis.into_iter();
        let slots = ops
            .into_iter()
            .map(|op| {
                let (r, h) = match op {
                    EditOp::Match | EditOp::Substitution => (reference.next(), hypothesis.next()),
                    EditOp::Insertion => (None, hypothesis.next()),
                    EditOp::Deletion => (reference.next(), None),
                };
                AlignedSlot {
                    reference: r,
                    hypothesis: h,
                    op,
                }
            })
            .collect();

        AlignmentResult {
            slots,
            reference_len: n,
            hypothesis_len: m,
        }
    }
}
