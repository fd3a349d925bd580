mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use treesync::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "treesync", version, about = "Replay the changes between two commits of one git tree onto another", long_about = None, disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff the source tree, preview the changes and apply them to the destination tree
    Sync {
        /// Sync config file (JSON, or YAML by extension)
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Show what a sync would do without prompting or touching the destination
    Plan {
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Validate both trees, the git binary and the expected destination commit
    Check {
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a template sync config
    Init {
        /// Where to write the config
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Inspect or update per-user defaults
    Defaults(cmd::defaults::DefaultsCmd),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    treesync::logging::init_logging(cli.debug);
    match cli.command {
        Commands::Sync { config } => cmd::sync::handle_sync(config),
        Commands::Plan { config } => cmd::plan::handle_plan(config),
        Commands::Check { config } => cmd::check::handle_check(config),
        Commands::Init { path, force } => cmd::init::handle_init(path, force),
        Commands::Defaults(args) => cmd::defaults::handle_defaults(args),
    }
}
