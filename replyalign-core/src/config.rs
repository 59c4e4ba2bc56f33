//! Tunable parameters of the alignment heuristics

use crate::error::{CoreError, Result};

/// Default quoted-line prefix
pub const DEFAULT_REPLY_PREFIX: &str = ">";

/// Default physical line separator
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Minimum share of matched positions for a marked line to count as quoted
pub const DEFAULT_ACCEPTANCE_RATIO: f64 = 0.5;

/// Quoted-printable soft line break marker
pub const DEFAULT_SOFT_WRAP_MARKER: &str = "=";

/// Soft-wrapped continuation lines must be shorter than this many positions
pub const DEFAULT_SOFT_WRAP_MAX_TOKENS: usize = 10;

/// Tokens that end a sentence inside a quoted block
pub const DEFAULT_SENTENCE_TERMINATORS: [&str; 5] = [".", "?", "!", ";", ":"];

/// Configuration shared by every stage of the alignment pipeline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AlignConfig {
    /// Prefix marking a quoted line
    pub reply_prefix: String,
    /// Marker a token carries when it ends a physical line
    pub line_separator: String,
    /// Matched/total ratio a marked line needs to be accepted
    pub acceptance_ratio: f64,
    /// Prefix of the token two positions before a soft-wrapped continuation
    pub soft_wrap_marker: String,
    /// Exclusive upper bound on the size of a soft-wrapped continuation line
    pub soft_wrap_max_tokens: usize,
    /// Sentence-ending tokens recognised inside quoted blocks
    pub sentence_terminators: Vec<String>,
    /// Collapse runs of blank lines before tokenizing
    pub collapse_blank_lines: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            reply_prefix: DEFAULT_REPLY_PREFIX.to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            acceptance_ratio: DEFAULT_ACCEPTANCE_RATIO,
            soft_wrap_marker: DEFAULT_SOFT_WRAP_MARKER.to_string(),
            soft_wrap_max_tokens: DEFAULT_SOFT_WRAP_MAX_TOKENS,
            sentence_terminators: DEFAULT_SENTENCE_TERMINATORS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            collapse_blank_lines: true,
        }
    }
}

impl AlignConfig {
    /// Create a builder starting from the defaults
    pub fn builder() -> AlignConfigBuilder {
        AlignConfigBuilder::default()
    }

    /// Whether `token` ends a physical line
    pub fn ends_line(&self, token: &str) -> bool {
        token.ends_with(self.line_separator.as_str())
    }

    /// Whether `token` opens a quoted line
    pub fn is_reply_marker(&self, token: &str) -> bool {
        token.starts_with(self.reply_prefix.as_str())
    }

    /// Whether `token` is a sentence terminator
    pub fn is_terminator(&self, token: &str) -> bool {
        self.sentence_terminators.iter().any(|t| t == token)
    }

    /// Check the configuration for values the heuristics cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.acceptance_ratio) {
            return Err(CoreError::InvalidConfig(format!(
                "acceptance ratio must be within [0, 1], got {}",
                self.acceptance_ratio
            )));
        }
        if self.reply_prefix.is_empty() {
            return Err(CoreError::InvalidConfig(
                "reply prefix must not be empty".to_string(),
            ));
        }
        if self.line_separator.is_empty() {
            return Err(CoreError::InvalidConfig(
                "line separator must not be empty".to_string(),
            ));
        }
        if self.sentence_terminators.is_empty() {
            return Err(CoreError::InvalidConfig(
                "at least one sentence terminator is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct AlignConfigBuilder {
    config: AlignConfig,
}

impl AlignConfigBuilder {
    /// Set the quoted-line prefix
    pub fn reply_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.reply_prefix = prefix.into();
        self
    }

    /// Set the line separator marker
    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.line_separator = separator.into();
        self
    }

    /// Set the line acceptance ratio
    pub fn acceptance_ratio(mut self, ratio: f64) -> Self {
        self.config.acceptance_ratio = ratio;
        self
    }

    /// Set the soft-wrap marker
    pub fn soft_wrap_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.soft_wrap_marker = marker.into();
        self
    }

    /// Set the soft-wrap size limit
    pub fn soft_wrap_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.soft_wrap_max_tokens = max_tokens;
        self
    }

    /// Replace the sentence terminator set
    pub fn sentence_terminators<I, S>(mut self, terminators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sentence_terminators = terminators.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable blank line collapsing
    pub fn collapse_blank_lines(mut self, collapse: bool) -> Self {
        self.config.collapse_blank_lines = collapse;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AlignConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
