//! Files command implementation - lists daily files

use anyhow::Result;
use daylog_core::LogSettings;
use daylog_logs::list_daily_files;

use crate::output::{print_files, print_info};

pub fn execute(settings: &LogSettings) -> Result<()> {
    let files = list_daily_files(settings.base_path())?;

    if files.is_empty() {
        print_info(&format!("No daily files for {}", settings.base_path()));
        return Ok(());
    }

    print_files(&files);
    Ok(())
}
