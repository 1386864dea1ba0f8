//! Leveled dispatcher
//!
//! A [`Logger`] owns the settings, one render buffer, and the active sink.
//! Every record that passes the level filter is rendered and written while
//! holding a single lock, so lines never interleave and reach the sink in
//! lock order. The lock and buffer are created on first use; a filtered call
//! never touches them.

use daylog_core::{Level, LogSettings, Result, SinkKind};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::format::{render, LineBuffer};
use crate::rotation::RotatingFileSink;
use crate::sink::{ConsoleSink, Sink, SinkOptions};

/// Outcome of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    /// Rendered and handed to the sink; carries the rendered length
    Written(usize),
    /// Below the minimum level, nothing was done
    Filtered,
}

impl LogStatus {
    pub fn is_filtered(&self) -> bool {
        matches!(self, LogStatus::Filtered)
    }

    /// Rendered length, 0 when filtered
    pub fn bytes(&self) -> usize {
        match self {
            LogStatus::Written(len) => *len,
            LogStatus::Filtered => 0,
        }
    }
}

/// State guarded by the dispatch lock
struct Dispatch {
    buffer: LineBuffer,
    sink: Box<dyn Sink>,
    options: SinkOptions,
    color: bool,
}

/// Process-wide logging context.
///
/// Construct one at startup, configure it, then share it (`&Logger`,
/// `Arc<Logger>`, or a `static` via `once_cell::sync::Lazy`). Call
/// [`Logger::shutdown`] before exit to flush the open file.
pub struct Logger {
    min_level: AtomicU8,
    clock: Arc<dyn Clock>,
    dispatch: OnceCell<Mutex<Dispatch>>,
}

impl Logger {
    /// Logger writing to stdout with default settings
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            min_level: AtomicU8::new(Level::default().as_u8()),
            clock,
            dispatch: OnceCell::new(),
        }
    }

    /// Build a logger from loaded settings
    pub fn from_settings(settings: &LogSettings) -> Result<Self> {
        Self::from_settings_with_clock(settings, Arc::new(SystemClock))
    }

    pub fn from_settings_with_clock(settings: &LogSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        settings.validate()?;

        let logger = Self::with_clock(clock);
        logger.set_level(settings.level);
        logger.set_color(settings.color);
        logger.set_flush(settings.flush);
        logger.set_retention_days(settings.retention_days);
        logger.set_max_file_size(settings.max_file_size);
        logger.set_file(&settings.file)?;
        logger.set_sink_kind(settings.sink);
        Ok(logger)
    }

    /// Emit one record.
    ///
    /// Records below the minimum level return [`LogStatus::Filtered`] without
    /// formatting or locking. Sink failures are absorbed; the result only
    /// reports what was rendered.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) -> LogStatus {
        if !self.enabled(level) {
            return LogStatus::Filtered;
        }

        let mut guard = self.dispatch().lock();
        let now = self.clock.now();
        let Dispatch {
            buffer,
            sink,
            options,
            color,
        } = &mut *guard;

        let len = render(buffer, level, &now, args, *color);
        sink.write(buffer.as_str(), options);
        LogStatus::Written(len)
    }

    /// Whether a record at `level` would be emitted
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Silent && level >= self.level()
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Level) {
        self.min_level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Replace the active sink; the previous one is closed
    pub fn set_sink<S: Sink + 'static>(&self, sink: S) {
        let mut guard = self.dispatch().lock();
        guard.sink.close();
        guard.sink = Box::new(sink);
    }

    /// Install one of the built-in sinks
    pub fn set_sink_kind(&self, kind: SinkKind) {
        match kind {
            SinkKind::Stdout => self.set_sink(ConsoleSink::stdout()),
            SinkKind::Stderr => self.set_sink(ConsoleSink::stderr()),
            SinkKind::File => self.set_sink(RotatingFileSink::with_clock(self.clock.clone())),
        }
    }

    pub fn set_color(&self, on: bool) {
        self.dispatch().lock().color = on;
    }

    pub fn set_flush(&self, on: bool) {
        self.dispatch().lock().options.flush_each_write = on;
    }

    pub fn set_retention_days(&self, days: u32) {
        self.dispatch().lock().options.retention_days = days;
    }

    pub fn set_max_file_size(&self, bytes: u64) {
        self.dispatch().lock().options.max_file_size = bytes;
    }

    /// Set the base path of daily files; a trailing `.log` is dropped.
    ///
    /// A blank path is rejected and leaves the previous path in place. The
    /// new path takes effect the next time the file sink opens a file.
    pub fn set_file(&self, path: &str) -> Result<()> {
        self.dispatch().lock().options.set_base_path(path)
    }

    /// Snapshot of the current sink options
    pub fn options(&self) -> SinkOptions {
        self.dispatch().lock().options.clone()
    }

    /// Flush the active sink; the file sink runs its rotation check first
    pub fn flush(&self) {
        let mut guard = self.dispatch().lock();
        let Dispatch { sink, options, .. } = &mut *guard;
        sink.flush(options);
    }

    /// Flush and close the active sink. A later record reopens it.
    pub fn shutdown(&self) {
        if let Some(dispatch) = self.dispatch.get() {
            dispatch.lock().sink.close();
        }
    }

    fn dispatch(&self) -> &Mutex<Dispatch> {
        self.dispatch.get_or_init(|| {
            Mutex::new(Dispatch {
                buffer: LineBuffer::default(),
                sink: Box::new(ConsoleSink::stdout()),
                options: SinkOptions::default(),
                color: false,
            })
        })
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}
