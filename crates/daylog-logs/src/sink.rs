//! Sink interface and console sinks

use daylog_core::{
    strip_log_suffix, Error, Result, DEFAULT_BASE_PATH, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_RETENTION_DAYS,
};
use std::io::Write;

/// Options a sink reads on every call.
///
/// They are owned by the [`crate::Logger`] and survive sink swaps, so a file
/// sink installed later picks up a base path configured earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    /// Flush after every record
    pub flush_each_write: bool,
    /// Number of most recent daily files to keep
    pub retention_days: u32,
    /// Stem of daily file names, without `.log`
    pub base_path: String,
    /// Size in bytes above which the daily file is truncated
    pub max_file_size: u64,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            flush_each_write: true,
            retention_days: DEFAULT_RETENTION_DAYS,
            base_path: DEFAULT_BASE_PATH.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl SinkOptions {
    /// Set the base path, dropping a trailing `.log`. Blank paths are rejected.
    pub fn set_base_path(&mut self, path: &str) -> Result<()> {
        if path.trim().is_empty() {
            return Err(Error::EmptyFilePath);
        }
        self.base_path = strip_log_suffix(path).to_string();
        Ok(())
    }
}

/// Destination for rendered lines.
///
/// `line` never contains the trailing newline; the sink appends it.
/// Implementations must swallow their own I/O failures: a failing sink drops
/// the record instead of reporting back to the caller.
pub trait Sink: Send {
    fn write(&mut self, line: &str, options: &SinkOptions);

    /// Push buffered output to the OS
    fn flush(&mut self, _options: &SinkOptions) {}

    /// Release held resources; a later write may reacquire them
    fn close(&mut self) {}
}

/// Standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes each line to stdout or stderr
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: &str, options: &SinkOptions) {
        match self.stream {
            Stream::Stdout => emit(&mut std::io::stdout().lock(), line, options.flush_each_write),
            Stream::Stderr => emit(&mut std::io::stderr().lock(), line, options.flush_each_write),
        }
    }

    fn flush(&mut self, _options: &SinkOptions) {
        let _ = match self.stream {
            Stream::Stdout => std::io::stdout().flush(),
            Stream::Stderr => std::io::stderr().flush(),
        };
    }
}

fn emit<W: Write>(out: &mut W, line: &str, flush: bool) {
    let _ = writeln!(out, "{}", line);
    if flush {
        let _ = out.flush();
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> Sink for FnSink<F>
where
    F: FnMut(&str) + Send,
{
    fn write(&mut self, line: &str, _options: &SinkOptions) {
        (self.0)(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_set_base_path_strips_suffix() {
        let mut options = SinkOptions::default();
        options.set_base_path("logs/app.log").unwrap();
        assert_eq!(options.base_path, "logs/app");

        options.set_base_path("logs/other").unwrap();
        assert_eq!(options.base_path, "logs/other");
    }

    #[test]
    fn test_set_base_path_rejects_blank() {
        let mut options = SinkOptions::default();
        assert!(matches!(options.set_base_path(""), Err(Error::EmptyFilePath)));
        assert!(matches!(options.set_base_path("   "), Err(Error::EmptyFilePath)));
        assert_eq!(options.base_path, DEFAULT_BASE_PATH);
    }

    #[test]
    fn test_emit_appends_newline() {
        let mut out = Vec::new();
        emit(&mut out, "hello", true);
        emit(&mut out, "world", false);
        assert_eq!(out, b"hello\nworld\n");
    }

    #[test]
    fn test_fn_sink_receives_lines() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let mut sink = FnSink(move |line: &str| captured.lock().unwrap().push(line.to_string()));

        sink.write("one", &SinkOptions::default());
        sink.write("two", &SinkOptions::default());

        assert_eq!(*seen.lock().unwrap(), vec!["one", "two"]);
    }
}
