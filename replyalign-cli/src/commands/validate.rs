//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = CliConfig::from_file(&self.config).and_then(|config| {
            config.validate()?;
            Ok(config)
        });

        match checked {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Mode: {}", config.alignment.mode);
                println!("  Reply prefix: {}", config.alignment.reply_prefix);
                println!("  Acceptance ratio: {}", config.alignment.acceptance_ratio);
                println!("  Output format: {}", config.output.default_format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
