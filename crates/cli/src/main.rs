mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::BuildArgs;

/// extbuild - out-of-tree builds of native extension modules
#[derive(Parser)]
#[command(name = "extbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Change to this directory (the project root) before doing anything
  #[arg(short = 'C', long, global = true)]
  directory: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure, compile and stage one or more extensions
  Build(BuildArgs),

  /// Show platform and build directory information
  Info,

  /// List the logical source files of the native project
  Sources {
    /// Project root (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Some(dir) = &cli.directory {
    std::env::set_current_dir(dir).with_context(|| format!("Failed to change to directory: {}", dir.display()))?;
  }

  match cli.command {
    Commands::Build(args) => cmd::cmd_build(args),
    Commands::Info => cmd::cmd_info(),
    Commands::Sources { root } => cmd::cmd_sources(root.as_deref()),
  }
}
