//! File reading utilities

use anyhow::{Context, Result};
use replyalign_engine::MessagePair;
use std::fs;
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a message pair; a missing source reads as an empty body
    pub fn read_pair(source: Option<&Path>, reply: &Path, id: Option<&str>) -> Result<MessagePair> {
        let reply_text = Self::read_text(reply)?;
        let (source_text, default_id) = match source {
            Some(source) => (
                Self::read_text(source)?,
                MessagePair::pair_id(source, reply),
            ),
            None => (
                String::new(),
                reply
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "reply".to_string()),
            ),
        };

        let id = id.map(str::to_string).unwrap_or(default_id);
        Ok(MessagePair::new(id, source_text, reply_text))
    }
}
