//! Tail command implementation - prints today's daily file

use anyhow::Result;
use daylog_core::LogSettings;
use daylog_logs::{LogReader, SystemClock};
use std::sync::Arc;
use tracing::info;

use crate::cli::TailArgs;
use crate::output::print_info;

pub async fn execute(settings: &LogSettings, args: TailArgs) -> Result<()> {
    let reader = LogReader::daily(settings.base_path(), Arc::new(SystemClock));

    if !reader.exists() {
        print_info(&format!("No log file for today: {}", reader.path().display()));
        return Ok(());
    }

    for line in reader.tail_efficient(args.lines)? {
        println!("{}", line);
    }

    if args.follow {
        info!("Following {}", reader.path().display());
        let mut rx = reader.follow()?;
        loop {
            tokio::select! {
                line = rx.recv() => match line {
                    Some(line) => println!("{}", line),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    Ok(())
}
