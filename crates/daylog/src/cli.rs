//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daylog")]
#[command(version, about = "Leveled logging to daily rotating files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (.toml, .yaml, .yml, .json); searched in the current directory when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base path of daily files, overriding the settings file
    #[arg(short, long, global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append one record to today's file
    Write(WriteArgs),

    /// Print the last lines of today's file
    Tail(TailArgs),

    /// List daily files with their sizes
    Files,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Record level (verbose, debug, info, warn, error, fatal)
    #[arg(short, long, default_value = "info")]
    pub level: String,

    /// Number of daily files to keep, overriding the settings file
    #[arg(long)]
    pub retention_days: Option<u32>,

    /// Wrap the record in ANSI colors
    #[arg(long)]
    pub color: bool,

    /// Message text; multiple words are joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Args)]
pub struct TailArgs {
    /// Number of lines to show
    #[arg(short = 'n', long, default_value = "20")]
    pub lines: usize,

    /// Keep printing lines as they are appended
    #[arg(long)]
    pub follow: bool,
}
