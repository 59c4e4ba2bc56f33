//! Batch command implementation

use super::{init_logging, ModeArg};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_patterns;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use replyalign_engine::{
    AlignmentMode, BatchOutput, BatchProcessor, EngineConfig, ExecutionMode, ExportSinks,
    ManifestEntry, PairManifest, SourceLineExporter, TagLineExporter, TaggedExporter, WriteMode,
};
use std::path::PathBuf;

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Pair manifests or patterns (supports glob)
    #[arg(short, long, value_name = "MANIFEST/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Directory receiving one tag file per pair
    #[arg(short, long, value_name = "DIR", required = true)]
    pub tag_dir: PathBuf,

    /// File the source side of every line is appended to
    #[arg(long, value_name = "FILE")]
    pub source_lines: Option<PathBuf>,

    /// File the tag of every line is appended to
    #[arg(long, value_name = "FILE")]
    pub tag_lines: Option<PathBuf>,

    /// Append to existing tag files instead of replacing them
    #[arg(short, long)]
    pub append: bool,

    /// Delete the content of the tag directory first
    #[arg(long)]
    pub clean: bool,

    /// Force parallel processing even for small batches
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads (default: one per core)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Alignment mode (default: from the configuration file, else wer)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        config.validate()?;
        let processor =
            BatchProcessor::with_config(self.engine_config(&config)?).map_err(CliError::from)?;

        let entries = self.collect_entries()?;
        log::info!("{} pair(s) listed", entries.len());

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_pairs(entries.len() as u64);

        progress.set_stage("loading");
        let mut pairs = Vec::with_capacity(entries.len());
        let mut load_failures = Vec::new();
        let mode = processor.config().mode;
        for entry in &entries {
            match entry.load_for(mode) {
                Ok(pair) => pairs.push(pair),
                Err(error) => {
                    log::error!("{}: skipped: {error}", entry.id());
                    progress.pair_completed();
                    load_failures.push((entry.id(), error));
                }
            }
        }

        progress.set_stage("aligning");
        let mut output = processor
            .process_with_progress(&pairs, &|| progress.pair_completed())
            .map_err(CliError::from)?;
        for (id, error) in load_failures {
            output.record_failure(id, error);
        }

        progress.set_stage("exporting");
        let sinks = self.export_sinks(&config)?;
        if self.clean {
            if let Some(tagged) = &sinks.tagged {
                tagged.clean().map_err(CliError::from)?;
            }
        }
        sinks.write_all(&output.outputs).map_err(CliError::from)?;
        progress.finish();

        if !self.quiet {
            self.print_summary(&output);
        }
        Ok(())
    }

    fn engine_config(&self, config: &CliConfig) -> Result<EngineConfig> {
        let mode = match self.mode {
            Some(mode) => AlignmentMode::from(mode),
            None => config.alignment.mode()?,
        };
        let threads = self.threads.or(config.performance.threads());
        let execution_mode = if self.parallel {
            log::info!(
                "parallel mode with {} worker(s)",
                threads.unwrap_or_else(num_cpus::get)
            );
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Adaptive
        };

        Ok(EngineConfig {
            align: config.alignment.to_align_config()?,
            mode,
            execution_mode,
            threads,
            parallel_threshold: config.performance.parallel_threshold,
        })
    }

    fn collect_entries(&self) -> Result<Vec<ManifestEntry>> {
        let mut entries = Vec::new();
        for path in resolve_patterns(&self.input)? {
            let manifest = PairManifest::from_file(&path).map_err(CliError::from)?;
            entries.extend(manifest.entries().iter().cloned());
        }
        Ok(entries)
    }

    fn export_sinks(&self, config: &CliConfig) -> Result<ExportSinks> {
        let write_mode = if self.append {
            WriteMode::Append
        } else {
            config.output.write_mode()?
        };

        Ok(ExportSinks {
            tagged: Some(TaggedExporter::new(&self.tag_dir).with_mode(write_mode)),
            source_lines: self.source_lines.as_ref().map(SourceLineExporter::new),
            tag_lines: self.tag_lines.as_ref().map(TagLineExporter::new),
        })
    }

    fn print_summary(&self, output: &BatchOutput) {
        let summary = output.summary();
        println!(
            "Aligned {}/{} pair(s) in {:.2?} ({})",
            summary.succeeded, summary.pairs, output.elapsed, output.mode_used
        );
        println!("  Line pairs:    {}", summary.line_pairs);
        println!("  Aligned lines: {}", summary.aligned_lines);
        println!("  Failed pairs:  {}", summary.failed);
        for (diagnostic, count) in summary.report.iter() {
            println!("  {diagnostic}: {count}");
        }
        println!("  Tag files:     {}", self.tag_dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> BatchArgs {
        fs::write(dir.path().join("s1"), "hello.\n").unwrap();
        fs::write(dir.path().join("r1"), "> hello.\nthanks\n").unwrap();
        fs::write(dir.path().join("pairs.tsv"), "s1\tr1\ns1\tmissing\n").unwrap();

        BatchArgs {
            input: vec![dir.path().join("pairs.tsv").display().to_string()],
            tag_dir: dir.path().join("tags"),
            source_lines: Some(dir.path().join("source_lines")),
            tag_lines: Some(dir.path().join("tag_lines")),
            append: false,
            clean: true,
            parallel: false,
            threads: None,
            mode: None,
            config: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_execute_exports_and_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let args = setup(&dir);

        args.execute().unwrap();

        let tag_file = fs::read_to_string(dir.path().join("tags").join("s1_r1")).unwrap();
        assert!(tag_file.ends_with("BE\thello .\n"));
        assert!(!dir.path().join("tags").join("s1_missing").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("tag_lines")).unwrap(),
            "BE\nO\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("source_lines")).unwrap(),
            "hello .\n\n"
        );
    }

    #[test]
    fn test_reply_only_batch_needs_no_source_file() {
        let dir = TempDir::new().unwrap();
        let mut args = setup(&dir);
        fs::write(dir.path().join("pairs.tsv"), "absent\tr1\n").unwrap();
        args.mode = Some(ModeArg::ReplyOnly);

        args.execute().unwrap();

        let tag_file = fs::read_to_string(dir.path().join("tags").join("absent_r1")).unwrap();
        assert!(tag_file.ends_with("BE\thello.\n"));
        assert_eq!(
            fs::read_to_string(dir.path().join("tag_lines")).unwrap(),
            "BE\nO\n"
        );
    }

    #[test]
    fn test_engine_config_from_flags() {
        let dir = TempDir::new().unwrap();
        let mut args = setup(&dir);
        args.parallel = true;
        args.threads = Some(3);
        args.mode = Some(ModeArg::ReplyOnly);

        let engine = args.engine_config(&CliConfig::default()).unwrap();
        assert_eq!(engine.execution_mode, ExecutionMode::Parallel);
        assert_eq!(engine.threads, Some(3));
        assert_eq!(engine.mode, AlignmentMode::ReplyOnly);
    }

    #[test]
    fn test_append_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let mut args = setup(&dir);
        args.append = true;

        let sinks = args.export_sinks(&CliConfig::default()).unwrap();
        assert!(sinks.tagged.is_some());
        assert!(sinks.source_lines.is_some());
    }
}
