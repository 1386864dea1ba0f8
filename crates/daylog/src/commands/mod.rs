//! Command implementations

pub mod files;
pub mod tail;
pub mod write;

use anyhow::Result;
use daylog_core::{Error, LogSettings};
use std::path::Path;
use tracing::debug;

/// Resolve settings from an explicit file, a file found in the current
/// directory, or the defaults, then apply the `--file` override.
pub fn load_settings(config: Option<&Path>, file: Option<&str>) -> Result<LogSettings> {
    let mut settings = match config {
        Some(path) => LogSettings::load(path)?,
        None => match LogSettings::find_and_load(&std::env::current_dir()?) {
            Ok((settings, path)) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(Error::ConfigError(_)) => LogSettings::default(),
            Err(e) => return Err(e.into()),
        },
    };

    if let Some(file) = file {
        settings.file = file.to_string();
    }
    settings.validate()?;
    Ok(settings)
}
