//! Constants and default values for daylog

/// Capacity of the render buffer; longer lines are truncated to this many bytes
pub const MAX_LINE_LEN: usize = 16 * 1024;

/// Default size ceiling of a daily file before it is truncated (64MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Length of a day bucket in epoch seconds
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days scanned by the retention sweep when no previous rotation is known
pub const FIRST_ROTATION_LOOKBACK_DAYS: i64 = 30;

/// Default base path for daily files
pub const DEFAULT_BASE_PATH: &str = "daylog";

/// Default number of daily files to keep
pub const DEFAULT_RETENTION_DAYS: u32 = 1;

/// Extension appended to every daily file
pub const LOG_EXTENSION: &str = "log";

/// ANSI sequence that resets colors
pub const COLOR_RESET: &str = "\x1b[0m";

/// Settings file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "daylog.toml",
    "daylog.yaml",
    "daylog.yml",
    "daylog.json",
];

/// Strip a trailing `.log` suffix from a base path.
///
/// Only the exact final extension is removed: `app.log` becomes `app`, while
/// `app.log.old` and `app.txt` are returned unchanged.
pub fn strip_log_suffix(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) if &path[pos + 1..] == LOG_EXTENSION => &path[..pos],
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_log_suffix() {
        assert_eq!(strip_log_suffix("app.log"), "app");
        assert_eq!(strip_log_suffix("/var/log/app.log"), "/var/log/app");
        assert_eq!(strip_log_suffix("app"), "app");
        assert_eq!(strip_log_suffix("app.txt"), "app.txt");
        assert_eq!(strip_log_suffix("app.log.old"), "app.log.old");
    }

    #[test]
    fn test_buffer_fits_reset_sequence() {
        assert!(MAX_LINE_LEN > COLOR_RESET.len() * 2);
    }
}
