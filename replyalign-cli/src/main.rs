//! replyalign command-line entry point

use clap::Parser;
use replyalign_cli::commands::Commands;

/// Align quoted email replies against their source messages
#[derive(Debug, Parser)]
#[command(name = "replyalign", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
