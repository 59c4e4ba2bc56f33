//! Message pairs and pair manifests
//!
//! A manifest lists one pair per line as `source_path<TAB>reply_path`.
//! Blank lines and lines starting with `#` are ignored; relative paths are
//! resolved against the manifest's own directory.

use crate::config::AlignmentMode;
use crate::error::{EngineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A source message and the reply that quotes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePair {
    /// Pair identifier, also the tagged export file name
    pub id: String,
    /// Body of the message replied to
    pub source: String,
    /// Body of the reply
    pub reply: String,
}

impl MessagePair {
    /// Create a pair from in-memory bodies
    pub fn new<I, S, R>(id: I, source: S, reply: R) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            id: id.into(),
            source: source.into(),
            reply: reply.into(),
        }
    }

    /// Identifier derived from the two file names: `<source>_<reply>`
    pub fn pair_id(source: &Path, reply: &Path) -> String {
        format!("{}_{}", file_name(source), file_name(reply))
    }

    /// Read both bodies from disk
    pub fn from_files(source: impl AsRef<Path>, reply: impl AsRef<Path>) -> Result<Self> {
        let (source, reply) = (source.as_ref(), reply.as_ref());
        Ok(Self {
            id: Self::pair_id(source, reply),
            source: read_message(source)?,
            reply: read_message(reply)?,
        })
    }

    /// Read only the reply; the source path just names the pair
    pub fn from_reply_file(source: impl AsRef<Path>, reply: impl AsRef<Path>) -> Result<Self> {
        let (source, reply) = (source.as_ref(), reply.as_ref());
        Ok(Self {
            id: Self::pair_id(source, reply),
            source: String::new(),
            reply: read_message(reply)?,
        })
    }
}

/// One manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// One-based line number in the manifest
    pub line: usize,
    /// Resolved source message path
    pub source: PathBuf,
    /// Resolved reply message path
    pub reply: PathBuf,
}

impl ManifestEntry {
    /// Identifier of the pair this entry loads
    pub fn id(&self) -> String {
        MessagePair::pair_id(&self.source, &self.reply)
    }

    /// Read the pair from disk
    pub fn load(&self) -> Result<MessagePair> {
        MessagePair::from_files(&self.source, &self.reply)
    }

    /// Read what `mode` needs from disk; reply-only alignment skips the source
    pub fn load_for(&self, mode: AlignmentMode) -> Result<MessagePair> {
        match mode {
            AlignmentMode::Wer => self.load(),
            AlignmentMode::ReplyOnly => MessagePair::from_reply_file(&self.source, &self.reply),
        }
    }
}

/// Parsed pair manifest
#[derive(Debug, Clone, Default)]
pub struct PairManifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl PairManifest {
    /// Read and parse a manifest file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EngineError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&text, path, base_dir)
    }

    /// Parse manifest text; `path` is only used in error messages
    pub fn parse(text: &str, path: &Path, base_dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let (source, reply) = match fields.as_slice() {
                [source, reply] if !source.is_empty() && !reply.is_empty() => (*source, *reply),
                _ => {
                    return Err(EngineError::ManifestError {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: format!(
                            "expected 'source<TAB>reply', found {} field(s)",
                            fields.iter().filter(|f| !f.is_empty()).count()
                        ),
                    })
                }
            };

            entries.push(ManifestEntry {
                line: index + 1,
                source: base_dir.join(source),
                reply: base_dir.join(reply),
            });
        }

        log::debug!("{}: {} pair(s)", path.display(), entries.len());
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Manifest file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in file order
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of pairs listed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest lists no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_message(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| EngineError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| {
        EngineError::EncodingError(format!("{} is not valid UTF-8: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_id_uses_file_names() {
        let id = MessagePair::pair_id(Path::new("corpus/a/msg1.txt"), Path::new("corpus/b/msg2"));
        assert_eq!(id, "msg1.txt_msg2");
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# pairs\n\nsrc1\trep1\n  \nsrc2\trep2\n";
        let manifest = PairManifest::parse(text, Path::new("m.tsv"), Path::new("base")).unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries()[0].line, 3);
        assert_eq!(manifest.entries()[0].source, Path::new("base").join("src1"));
        assert_eq!(manifest.entries()[1].reply, Path::new("base").join("rep2"));
        assert_eq!(manifest.entries()[1].id(), "src2_rep2");
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let text = "/data/src\t/data/rep\n";
        let manifest = PairManifest::parse(text, Path::new("m.tsv"), Path::new("base")).unwrap();
        assert_eq!(manifest.entries()[0].source, PathBuf::from("/data/src"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "src1\trep1\nonly-one-field\n";
        let err = PairManifest::parse(text, Path::new("m.tsv"), Path::new("")).unwrap_err();

        match err {
            EngineError::ManifestError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reply_only_load_skips_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rep"), "> quoted\n").unwrap();
        let manifest =
            PairManifest::parse("missing\trep\n", Path::new("m.tsv"), dir.path()).unwrap();
        let entry = &manifest.entries()[0];

        let pair = entry.load_for(AlignmentMode::ReplyOnly).unwrap();
        assert_eq!(pair.id, "missing_rep");
        assert_eq!(pair.source, "");
        assert_eq!(pair.reply, "> quoted\n");

        let err = entry.load_for(AlignmentMode::Wer).unwrap_err();
        assert!(matches!(err, EngineError::ReadError { .. }));
    }

    #[test]
    fn test_too_many_fields_is_an_error() {
        let text = "a\tb\tc\n";
        assert!(PairManifest::parse(text, Path::new("m.tsv"), Path::new("")).is_err());
    }
}
