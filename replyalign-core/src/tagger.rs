//! Positional tags for line pairs
//!
//! Each aligned pair is tagged by where it sits in its run of consecutive
//! aligned pairs; unaligned pairs are outside any run.

use crate::line_aligner::LinePair;
use std::fmt;
use std::str::FromStr;

/// Position of a line pair relative to its quoted block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    /// Not aligned
    O,
    /// First line of a block of two or more
    B,
    /// Inside a block
    I,
    /// Last line of a block of two or more
    E,
    /// Single-line block
    BE,
}

impl Tag {
    /// Every tag value
    pub const ALL: [Tag; 5] = [Tag::O, Tag::B, Tag::I, Tag::E, Tag::BE];

    /// Tag label as written to exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::O => "O",
            Tag::B => "B",
            Tag::I => "I",
            Tag::E => "E",
            Tag::BE => "BE",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O" => Ok(Tag::O),
            "B" => Ok(Tag::B),
            "I" => Ok(Tag::I),
            "E" => Ok(Tag::E),
            "BE" => Ok(Tag::BE),
            other => Err(format!("unknown tag: {other}")),
        }
    }
}

/// Assigns one tag per line pair from the alignment state of its neighbours
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTagger;

impl LineTagger {
    /// Create a new tagger
    pub fn new() -> Self {
        Self
    }

    /// Tag every pair; output has the same length and order as `pairs`
    pub fn tag(&self, pairs: &[LinePair]) -> Vec<Tag> {
        let aligned = |i: Option<usize>| {
            i.and_then(|i| pairs.get(i))
                .is_some_and(LinePair::is_aligned)
        };

        (0..pairs.len())
            .map(|i| {
                if !pairs[i].is_aligned() {
                    return Tag::O;
                }
                match (aligned(i.checked_sub(1)), aligned(Some(i + 1))) {
                    (false, false) => Tag::BE,
                    (false, true) => Tag::B,
                    (true, false) => Tag::E,
                    (true, true) => Tag::I,
                }
            })
            .collect()
    }
}
