//! daylog CLI - write, tail, and list daily rotating log files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("daylog={0},daylog_logs={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let settings = match load_settings(cli.config.as_deref(), cli.file.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Write(args) => write::execute(settings, args),
        Commands::Tail(args) => tail::execute(&settings, args).await,
        Commands::Files => files::execute(&settings),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
