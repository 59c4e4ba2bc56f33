//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use replyalign_engine::PairOutput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter - outputs pairs as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    pairs: Vec<PairData>,
}

/// One pair in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct PairData {
    /// Pair identifier
    pub id: String,
    /// Every line pair in order
    pub lines: Vec<LineData>,
    /// Number of aligned lines
    pub aligned: usize,
    /// Diagnostic counters by name
    pub diagnostics: BTreeMap<String, usize>,
}

/// One line pair in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct LineData {
    /// Positional tag
    pub tag: String,
    /// Source side, absent when the line has none
    pub source: Option<String>,
    /// Reply side, absent when the line has none
    pub reply: Option<String>,
}

impl From<&PairOutput> for PairData {
    fn from(output: &PairOutput) -> Self {
        let message = &output.message;
        Self {
            id: output.id.clone(),
            lines: message
                .lines()
                .map(|line| LineData {
                    tag: line.tag.to_string(),
                    source: line.source.map(str::to_string),
                    reply: line.reply.map(str::to_string),
                })
                .collect(),
            aligned: message.aligned_count(),
            diagnostics: message
                .report()
                .iter()
                .map(|(diagnostic, count)| (diagnostic.name().to_string(), count))
                .collect(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            pairs: Vec::new(),
        }
    }

    /// Enable or disable pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_pair(&mut self, output: &PairOutput) -> Result<()> {
        self.pairs.push(PairData::from(output));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.pairs)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.pairs)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
