//! Level table and sink selection

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Record severity, ordered from least to most severe.
///
/// `Silent` is only meaningful as a threshold: a logger whose minimum level is
/// `Silent` drops every record.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    #[default]
    Verbose = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Silent = 6,
}

impl Level {
    /// All levels that can be attached to a record
    pub const RECORD_LEVELS: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Fixed-width label rendered between brackets
    pub fn label(&self) -> &'static str {
        match self {
            Level::Verbose => "VERB ",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warn => "WARN ",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Silent => "",
        }
    }

    /// ANSI color prefix, empty for levels that are never colored
    pub fn color(&self) -> &'static str {
        match self {
            Level::Verbose | Level::Silent => "",
            Level::Debug => "\x1b[37m",
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[33m",
            Level::Error => "\x1b[31m",
            Level::Fatal => "\x1b[41;37m",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Silent => "silent",
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::as_u8`]; out-of-range values saturate to `Silent`
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Verbose,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Fatal,
            _ => Level::Silent,
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "trace" => Ok(Level::Verbose),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" | "err" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "silent" | "off" => Ok(Level::Silent),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Built-in sink selection, as named in settings files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    File,
}

impl FromStr for SinkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(SinkKind::Stdout),
            "stderr" => Ok(SinkKind::Stderr),
            "file" => Ok(SinkKind::File),
            _ => Err(Error::InvalidSink(s.to_string())),
        }
    }
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SinkKind::Stdout => "stdout",
            SinkKind::Stderr => "stderr",
            SinkKind::File => "file",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::Verbose < Level::Debug);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Fatal < Level::Silent);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("off".parse::<Level>().unwrap(), Level::Silent);
        assert!(matches!("loud".parse::<Level>(), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_level_u8_round_trip() {
        for level in Level::RECORD_LEVELS {
            assert_eq!(Level::from_u8(level.as_u8()), level);
        }
        assert_eq!(Level::from_u8(200), Level::Silent);
    }

    #[test]
    fn test_labels_share_width() {
        for level in Level::RECORD_LEVELS {
            assert_eq!(level.label().len(), 5);
        }
        assert!(Level::Verbose.color().is_empty());
        assert!(!Level::Error.color().is_empty());
    }

    #[test]
    fn test_sink_kind_parse() {
        assert_eq!("file".parse::<SinkKind>().unwrap(), SinkKind::File);
        assert_eq!(SinkKind::Stderr.to_string(), "stderr");
        assert!("syslog".parse::<SinkKind>().is_err());
    }
}
