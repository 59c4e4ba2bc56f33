//! Tokens and the tokenizer seam
//!
//! The aligner only needs an ordered list of token strings in which every
//! physical line end is visible as a token ending in the line separator.
//! [`SimpleTokenizer`] satisfies that contract; callers with their own
//! tokenizer plug it in through [`Tokenizer`].

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("blank line pattern is valid"));

/// Immutable text unit with its index in the sequence it came from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Position in the owning sequence
    pub index: usize,
    /// Original text, line separator included
    pub text: String,
    /// Lower-cased comparison form
    pub normalized: String,
}

impl Token {
    /// Create a token, deriving its comparison form
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let normalized = text.to_lowercase();
        Self {
            index,
            text,
            normalized,
        }
    }

    /// Case-insensitive equality on the comparison forms
    pub fn matches(&self, other: &Token) -> bool {
        self.normalized == other.normalized
    }

    /// Build an indexed token sequence from raw strings
    pub fn sequence<S: AsRef<str>>(texts: &[S]) -> Vec<Token> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| Token::new(index, text.as_ref()))
            .collect()
    }
}

/// Splits message text into word and punctuation tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`, keeping every line end visible as a token
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word/punctuation tokenizer that emits each line break as its own token
///
/// Alphanumeric runs form one token, any other non-whitespace character is a
/// token by itself, and `\n` is kept verbatim as a standalone token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        for ch in text.chars() {
            if ch.is_alphanumeric() {
                word.push(ch);
                continue;
            }
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if ch == '\n' {
                tokens.push("\n".to_string());
            } else if !ch.is_whitespace() {
                tokens.push(ch.to_string());
            }
        }
        if !word.is_empty() {
            tokens.push(word);
        }

        tokens
    }
}

/// Replace runs of blank lines with a single line break
pub fn collapse_blank_lines(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    BLANK_LINES.replace_all(&unified, "\n").into_owned()
}
