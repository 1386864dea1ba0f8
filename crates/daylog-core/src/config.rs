//! Settings file parsing for daylog
//!
//! Supports multiple settings file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::{Level, SinkKind};

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Logger settings as read from a settings file.
///
/// Every field is optional; missing fields fall back to the defaults in
/// [`crate::constants`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level a record needs to be emitted
    pub level: Level,
    /// Wrap each line in the level's ANSI color
    pub color: bool,
    /// Flush the file after every record
    pub flush: bool,
    /// Number of most recent daily files to keep
    pub retention_days: u32,
    /// Base path of daily files; a trailing `.log` is ignored
    pub file: String,
    /// Which built-in sink receives records
    pub sink: SinkKind,
    /// Size in bytes after which the daily file is truncated
    pub max_file_size: u64,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::default(),
            color: false,
            flush: true,
            retention_days: DEFAULT_RETENTION_DAYS,
            file: DEFAULT_BASE_PATH.to_string(),
            sink: SinkKind::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LogSettings {
    /// Load settings from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported settings file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse settings content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let settings: LogSettings = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Find and load a settings file from a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let settings = Self::load(&path)?;
                return Ok((settings, path));
            }
        }
        Err(Error::ConfigError(format!(
            "No settings file found in {}. Expected one of: {:?}",
            dir.display(),
            CONFIG_FILES
        )))
    }

    /// Reject settings that would be refused by the logger setters
    pub fn validate(&self) -> Result<()> {
        if self.file.trim().is_empty() {
            return Err(Error::EmptyFilePath);
        }
        if self.max_file_size == 0 {
            return Err(Error::config("max_file_size must be greater than zero"));
        }
        Ok(())
    }

    /// Base path with any trailing `.log` removed
    pub fn base_path(&self) -> &str {
        strip_log_suffix(&self.file)
    }
}
