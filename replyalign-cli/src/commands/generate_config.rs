//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to tune the alignment heuristics");
        println!("2. Validate your configuration:");
        println!("   replyalign validate -c {}", self.output.display());
        println!("3. Use it for alignment:");
        println!(
            "   replyalign batch -i pairs.tsv --tag-dir tags -c {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template() -> String {
        r#"# replyalign configuration
# Every key is optional; removed keys fall back to the values shown here.

[alignment]
# "wer" aligns the reply against its source message,
# "reply-only" trusts the quote markers of the reply alone
mode = "wer"

# Prefix of a quoted line
reply_prefix = ">"

# Share of a quoted line's positions that must match the source
acceptance_ratio = 0.5

# Quoted-printable soft line break marker
soft_wrap_marker = "="

# A line continuing a soft-wrapped quoted line must be shorter than this
soft_wrap_max_tokens = 10

# Punctuation closing a sentence inside a quoted block
sentence_terminators = [".", "?", "!", ";", ":"]

# Collapse runs of blank lines before tokenizing
collapse_blank_lines = true

[output]
# Format of the align command: "text", "json" or "markdown"
default_format = "text"

# Indent JSON output
pretty_json = true

# "truncate" replaces existing tag files, "append" adds to them
write_mode = "truncate"

[performance]
# Batches with at least this many pairs run in parallel
parallel_threshold = 64

# Worker threads for parallel batches (0 = one per core)
worker_threads = 0
"#
        .to_string()
    }
}
