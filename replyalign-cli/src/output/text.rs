//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use replyalign_engine::export::tagged_lines;
use replyalign_engine::PairOutput;
use std::io::{self, Write};

/// Plain text formatter - the tagged export lines of every pair
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_pair(&mut self, output: &PairOutput) -> Result<()> {
        for line in tagged_lines(&output.message) {
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_output, SharedBuffer};

    #[test]
    fn test_text_lists_aligned_lines() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        formatter.format_pair(&sample_output()).unwrap();
        formatter.finish().unwrap();

        assert_eq!(
            buffer.contents(),
            "B\tAre you coming ?\nE\tLet me know .\n"
        );
    }
}
