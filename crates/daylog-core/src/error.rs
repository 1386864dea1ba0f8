//! Error types for daylog
//!
//! Only configuration is fallible. The logging path itself never returns
//! these errors.

use std::path::PathBuf;

/// daylog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Log file path must not be empty")]
    EmptyFilePath,

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid sink: {0}")]
    InvalidSink(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for daylog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}
