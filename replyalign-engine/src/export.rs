//! Export sinks for aligned pairs
//!
//! All writers run on the calling thread after a batch has been aligned, so
//! files shared by many pairs never see concurrent writes.

use crate::error::{EngineError, Result};
use crate::processor::PairOutput;
use replyalign_core::AlignedMessage;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How an existing destination file is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file
    #[default]
    Truncate,
    /// Add to the end of the file
    Append,
}

impl WriteMode {
    fn open(self, path: &Path) -> Result<BufWriter<File>> {
        let file = match self {
            WriteMode::Truncate => File::create(path),
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(|e| EngineError::IoError(format!("cannot open {}: {e}", path.display())))?;
        Ok(BufWriter::new(file))
    }
}

/// `tag<TAB>source` for every aligned line of `message`
pub fn tagged_lines(message: &AlignedMessage) -> Vec<String> {
    message
        .lines()
        .filter(|line| line.is_aligned())
        .map(|line| format!("{}\t{}", line.tag, line.source.unwrap_or_default()))
        .collect()
}

/// Writes one tag file per pair into a directory
#[derive(Debug, Clone)]
pub struct TaggedExporter {
    dir: PathBuf,
    mode: WriteMode,
}

impl TaggedExporter {
    /// Export into `dir`, truncating existing files
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: WriteMode::default(),
        }
    }

    /// Set the write mode
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Delete the directory's content, then make sure it exists
    pub fn clean(&self) -> Result<()> {
        if self.dir.is_dir() {
            log::info!("deleting the content of {}", self.dir.display());
            for entry in fs::read_dir(&self.dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                } else {
                    fs::remove_file(&path)?;
                }
            }
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the tag file for pair `id`
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    /// Write the tag file of one pair and return its path
    pub fn export(&self, output: &PairOutput) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&output.id);
        let mut writer = self.mode.open(&path)?;

        writeln!(writer, "# {}", path.display())?;
        for line in tagged_lines(&output.message) {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;

        log::debug!("wrote {}", path.display());
        Ok(path)
    }
}

/// Appends the source side of every line pair to one file
#[derive(Debug, Clone)]
pub struct SourceLineExporter {
    path: PathBuf,
}

impl SourceLineExporter {
    /// Append to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one line per pair; an absent source is an empty line
    pub fn export(&self, message: &AlignedMessage) -> Result<()> {
        let mut writer = WriteMode::Append.open(&self.path)?;
        for pair in message.pairs() {
            writeln!(writer, "{}", pair.source().unwrap_or_default())?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Appends the tag of every line pair to one file
#[derive(Debug, Clone)]
pub struct TagLineExporter {
    path: PathBuf,
}

impl TagLineExporter {
    /// Append to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one tag per line
    pub fn export(&self, message: &AlignedMessage) -> Result<()> {
        let mut writer = WriteMode::Append.open(&self.path)?;
        for tag in message.tags() {
            writeln!(writer, "{tag}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// The configured set of sinks for a batch
#[derive(Debug, Clone, Default)]
pub struct ExportSinks {
    /// Per-pair tag files
    pub tagged: Option<TaggedExporter>,
    /// Raw source line file
    pub source_lines: Option<SourceLineExporter>,
    /// Tag line file
    pub tag_lines: Option<TagLineExporter>,
}

impl ExportSinks {
    /// Whether no sink is configured
    pub fn is_empty(&self) -> bool {
        self.tagged.is_none() && self.source_lines.is_none() && self.tag_lines.is_none()
    }

    /// Write one pair to every configured sink
    pub fn write(&self, output: &PairOutput) -> Result<()> {
        if let Some(tagged) = &self.tagged {
            tagged.export(output)?;
        }
        if let Some(source_lines) = &self.source_lines {
            source_lines.export(&output.message)?;
        }
        if let Some(tag_lines) = &self.tag_lines {
            tag_lines.export(&output.message)?;
        }
        Ok(())
    }

    /// Write every pair in order
    pub fn write_all<'a>(
        &self,
        outputs: impl IntoIterator<Item = &'a PairOutput>,
    ) -> Result<usize> {
        let mut written = 0;
        for output in outputs {
            self.write(output)?;
            written += 1;
        }
        Ok(written)
    }
}
