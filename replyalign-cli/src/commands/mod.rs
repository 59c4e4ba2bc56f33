//! CLI command implementations

use clap::Subcommand;
use replyalign_engine::AlignmentMode;

pub mod align;
pub mod batch;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Align one reply against its source message and print the result
    Align(align::AlignArgs),

    /// Align every pair listed in one or more manifests and export the tags
    Batch(batch::BatchArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List available alignment modes
    Modes,
}

/// Alignment mode as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Edit-distance alignment against the source
    Wer,
    /// Quote markers of the reply only
    ReplyOnly,
}

impl From<ModeArg> for AlignmentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wer => AlignmentMode::Wer,
            ModeArg::ReplyOnly => AlignmentMode::ReplyOnly,
        }
    }
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Align(args) => args.execute(),
            Commands::Batch(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // a second command in the same process keeps the first logger
        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}
