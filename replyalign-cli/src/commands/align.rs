//! Align command implementation

use super::{init_logging, ModeArg};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::{create_formatter, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use replyalign_engine::{AlignmentMode, PairAligner};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the align command
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Source message file (not read in reply-only mode)
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Reply message file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub reply: PathBuf,

    /// Pair identifier (default: <source file name>_<reply file name>)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Alignment mode (default: from the configuration file, else wer)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output format (default: from the configuration file, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AlignArgs {
    /// Execute the align command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        config.validate()?;

        let mode = match self.mode {
            Some(mode) => AlignmentMode::from(mode),
            None => config.alignment.mode()?,
        };
        if mode == AlignmentMode::Wer && self.source.is_none() {
            return Err(CliError::ConfigError(
                "--source is required unless the mode is reply-only".to_string(),
            )
            .into());
        }

        let pair = FileReader::read_pair(self.source.as_deref(), &self.reply, self.id.as_deref())?;
        let aligner = PairAligner::new(config.alignment.to_align_config()?, mode)
            .map_err(CliError::from)?;
        let output = aligner.align(&pair).map_err(CliError::from)?;
        log::info!(
            "{}: {} line pair(s), {} aligned",
            output.id,
            output.message.len(),
            output.message.aligned_count()
        );

        let format = match self.format {
            Some(format) => format,
            None => config.output.format()?,
        };
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        formatter.format_pair(&output)?;
        formatter.finish()?;
        Ok(())
    }
}
