//! Write command implementation - appends one record to today's file

use anyhow::Result;
use daylog_core::{Level, LogSettings, SinkKind};
use daylog_logs::{LogStatus, Logger};
use tracing::info;

use crate::cli::WriteArgs;
use crate::output::print_success;

pub fn execute(mut settings: LogSettings, args: WriteArgs) -> Result<()> {
    let level: Level = args.level.parse()?;
    if level == Level::Silent {
        anyhow::bail!("'silent' is a threshold, not a record level");
    }

    settings.sink = SinkKind::File;
    if let Some(days) = args.retention_days {
        settings.retention_days = days;
    }
    if args.color {
        settings.color = true;
    }

    let logger = Logger::from_settings(&settings)?;
    let message = args.message.join(" ");
    let status = daylog_logs::log!(logger, level, "{}", message);
    logger.shutdown();

    match status {
        LogStatus::Written(len) => {
            info!("Wrote {} bytes at level {}", len, level);
            print_success(&format!("Wrote {} record to {}", level, settings.base_path()));
        }
        LogStatus::Filtered => {
            info!("Record filtered: {} is below {}", level, settings.level);
        }
    }

    Ok(())
}
