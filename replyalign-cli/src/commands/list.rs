//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use replyalign_engine::AlignmentMode;

/// Print the requested component list
pub fn execute(subcommand: ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Formats => {
            println!("Available output formats:");
            for format in OutputFormat::ALL {
                println!("  {:<10} {}", format.as_str(), format.description());
            }
        }
        ListCommands::Modes => {
            println!("Available alignment modes:");
            for mode in AlignmentMode::ALL {
                println!("  {:<10} {}", mode.as_str(), mode.description());
            }
        }
    }
    Ok(())
}
