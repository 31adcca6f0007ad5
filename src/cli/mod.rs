//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod replay;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stakeguard - stake sizing and risk gating for binary-outcome trading.
#[derive(Parser, Debug)]
#[command(name = "stakeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a script of trade outcomes through the engine
    Replay(ReplayArgs),

    /// Validate configuration file
    Check(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `replay` subcommand.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Path to configuration file; built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Outcome script (`win <profit>`, `loss <profit>`, `new-day`, `reset`)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Override the stake policy (recovery, progression)
    #[arg(long)]
    pub policy: Option<String>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}
