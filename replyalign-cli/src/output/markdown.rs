//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use replyalign_engine::PairOutput;
use std::io::Write;

/// Markdown formatter - one table per pair
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    line_count: usize,
    aligned_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_count: 0,
            aligned_count: 0,
        }
    }
}

fn cell(text: Option<&str>) -> String {
    text.map(|t| t.replace('|', "\\|")).unwrap_or_default()
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_pair(&mut self, output: &PairOutput) -> Result<()> {
        writeln!(self.writer, "## {}", output.id)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Tag | Source | Reply |")?;
        writeln!(self.writer, "|-----|--------|-------|")?;
        for line in output.message.lines() {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                line.tag,
                cell(line.source),
                cell(line.reply)
            )?;
        }
        writeln!(self.writer)?;

        self.line_count += output.message.len();
        self.aligned_count += output.message.aligned_count();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total lines: {}, aligned: {}*",
            self.line_count, self.aligned_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_output, SharedBuffer};

    #[test]
    fn test_markdown_table_and_footer() {
        let buffer = SharedBuffer::default();
        let mut formatter = MarkdownFormatter::new(buffer.clone());
        formatter.format_pair(&sample_output()).unwrap();
        formatter.finish().unwrap();

        let content = buffer.contents();
        assert!(content.starts_with("## src_rep\n"));
        assert!(content.contains("| B | Are you coming ? | > Are you coming ? |"));
        assert!(content.contains("| O |  |  |"));
        assert!(content.ends_with("*Total lines: 3, aligned: 2*\n"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        assert_eq!(cell(Some("a | b")), "a \\| b");
        assert_eq!(cell(None), "");
    }
}
