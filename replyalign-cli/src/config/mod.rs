//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use replyalign_core::config::{
    DEFAULT_ACCEPTANCE_RATIO, DEFAULT_REPLY_PREFIX, DEFAULT_SENTENCE_TERMINATORS,
    DEFAULT_SOFT_WRAP_MARKER, DEFAULT_SOFT_WRAP_MAX_TOKENS,
};
use replyalign_core::AlignConfig;
use replyalign_engine::{AlignmentMode, WriteMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Alignment configuration
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&text)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.alignment.to_align_config()?;
        self.alignment.mode()?;
        self.output.write_mode()?;
        self.output.format()?;
        Ok(())
    }
}

/// Alignment-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Alignment mode: "wer" or "reply-only"
    pub mode: String,

    /// Prefix marking a quoted line
    pub reply_prefix: String,

    /// Minimum share of aligned positions for a quoted line
    pub acceptance_ratio: f64,

    /// Quoted-printable soft line break marker
    pub soft_wrap_marker: String,

    /// Continuation lines must be shorter than this many positions
    pub soft_wrap_max_tokens: usize,

    /// Sentence-ending punctuation tokens
    pub sentence_terminators: Vec<String>,

    /// Collapse runs of blank lines before tokenizing
    pub collapse_blank_lines: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Wer.as_str().to_string(),
            reply_prefix: DEFAULT_REPLY_PREFIX.to_string(),
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

impl AlignmentConfig {
    /// Build the validated core configuration
    pub fn to_align_config(&self) -> Result<AlignConfig> {
        let config = AlignConfig::builder()
            .reply_prefix(self.reply_prefix.as_str())
            .acceptance_ratio(self.acceptance_ratio)
            .soft_wrap_marker(self.soft_wrap_marker.as_str())
            .soft_wrap_max_tokens(self.soft_wrap_max_tokens)
            .sentence_terminators(self.sentence_terminators.iter())
            .collapse_blank_lines(self.collapse_blank_lines)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Parse the alignment mode
    pub fn mode(&self) -> Result<AlignmentMode> {
        let mode = self
            .mode
            .parse::<AlignmentMode>()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(mode)
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format of the align command
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// "truncate" or "append" for tag files
    pub write_mode: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
            write_mode: "truncate".to_string(),
        }
    }
}

impl OutputConfig {
    /// Parse the default output format
    pub fn format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format '{}', expected text, json or markdown",
                self.default_format
            ))
            .into()
        })
    }

    /// Parse the tag file write mode
    pub fn write_mode(&self) -> Result<WriteMode> {
        match self.write_mode.to_ascii_lowercase().as_str() {
            "truncate" => Ok(WriteMode::Truncate),
            "append" => Ok(WriteMode::Append),
            other => Err(CliError::ConfigError(format!(
                "unknown write mode '{other}', expected 'truncate' or 'append'"
            ))
            .into()),
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Pair count above which batches run in parallel
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker count, `None` for one per core
    pub fn threads(&self) -> Option<usize> {
        (self.worker_threads > 0).then_some(self.worker_threads)
    }
}
