//! Daily rotating file sink
//!
//! One file per local calendar day, named `{base}-YYYY-MM-DD.log`. Before
//! every write the sink compares the local day number of now with that of
//! the last rotation, so the first write after a day boundary rotates exactly
//! once no matter how long the process was idle.
//! Rotating also sweeps files that fell out of the retention window. A file
//! that grows past the size ceiling is truncated in place and keeps its name.
//!
//! Files are opened in append mode so several processes can share a daily
//! file; only the process that hits the size ceiling truncates it.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use daylog_core::{FIRST_ROTATION_LOOKBACK_DAYS, LOG_EXTENSION, MAX_LINE_LEN};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::sink::{Sink, SinkOptions};

/// Holds a whole line plus newline so each record leaves in one write
const WRITE_BUFFER_LEN: usize = MAX_LINE_LEN * 2;

/// Path of the daily file for the local date of `epoch_secs`
pub fn daily_path(base: &str, epoch_secs: i64) -> PathBuf {
    daily_path_for_date(base, local_date(epoch_secs))
}

/// Path of the daily file for `date`
pub fn daily_path_for_date(base: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "{}-{:04}-{:02}-{:02}.{}",
        base,
        date.year(),
        date.month(),
        date.day(),
        LOG_EXTENSION
    ))
}

fn local_date(epoch_secs: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .date_naive()
}

/// Local calendar day number, the bucket rotation compares
fn local_day(epoch_secs: i64) -> i64 {
    i64::from(local_date(epoch_secs).num_days_from_ce())
}

/// State owned by a single [`RotatingFileSink`]
#[derive(Debug, Default)]
struct RotationState {
    file: Option<BufWriter<File>>,
    current_path: PathBuf,
    /// Length of the open file including buffered bytes; read from disk on open
    written: u64,
    /// Epoch seconds of the last day rotation, 0 before the first one
    last_rotation: i64,
}

/// Sink that writes to one file per local calendar day
pub struct RotatingFileSink {
    clock: Arc<dyn Clock>,
    state: RotationState,
}

impl RotatingFileSink {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: RotationState::default(),
        }
    }

    /// Path of the open daily file, if one is open
    pub fn current_path(&self) -> Option<&Path> {
        self.state
            .file
            .as_ref()
            .map(|_| self.state.current_path.as_path())
    }

    pub fn is_open(&self) -> bool {
        self.state.file.is_some()
    }

    /// Run the day and size checks, returning the writer to use.
    ///
    /// `None` means no file could be opened; the next call tries again.
    fn shift(&mut self, options: &SinkOptions) -> Option<&mut BufWriter<File>> {
        let now = self.clock.now().timestamp();
        let mut interval_days = local_day(now) - local_day(self.state.last_rotation);

        if self.state.file.is_none() || interval_days > 0 {
            if let Some(mut old) = self.state.file.take() {
                let _ = old.flush();
                debug!(
                    "Closing daily log file after {} day(s): {}",
                    interval_days,
                    self.state.current_path.display()
                );
            } else {
                // No history: bound the sweep to a fixed lookback
                interval_days = FIRST_ROTATION_LOOKBACK_DAYS;
            }

            sweep_expired(options, now, interval_days);
            self.open_daily(options, now);
        }

        if self.exceeds_size(options) {
            self.truncate_current();
        }

        self.state.file.as_mut()
    }

    fn open_daily(&mut self, options: &SinkOptions, now: i64) {
        let path = daily_path(&options.base_path, now);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                debug!("Failed to create log directory {}: {}", parent.display(), e);
                return;
            }
        }

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                debug!("Opened daily log file: {}", path.display());
                self.state.written = file.metadata().map(|m| m.len()).unwrap_or(0);
                self.state.file = Some(BufWriter::with_capacity(WRITE_BUFFER_LEN, file));
                self.state.current_path = path;
                self.state.last_rotation = now;
            }
            Err(e) => {
                debug!("Failed to open log file {}: {}", path.display(), e);
            }
        }
    }

    fn exceeds_size(&self, options: &SinkOptions) -> bool {
        self.state.file.is_some() && self.state.written > options.max_file_size
    }

    /// Reopen the current file under the same name, discarding its content
    fn truncate_current(&mut self) {
        if let Some(mut old) = self.state.file.take() {
            let _ = old.flush();
        }

        let path = &self.state.current_path;
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
        {
            Ok(file) => {
                debug!("Truncated oversized log file: {}", path.display());
                self.state.written = 0;
                self.state.file = Some(BufWriter::with_capacity(WRITE_BUFFER_LEN, file));
            }
            Err(e) => {
                warn!("Failed to truncate log file {}: {}", path.display(), e);
            }
        }
    }
}

impl Default for RotatingFileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for RotatingFileSink {
    fn write(&mut self, line: &str, options: &SinkOptions) {
        let Some(writer) = self.shift(options) else {
            return;
        };

        let result = write_line(writer, line).and_then(|written| {
            if options.flush_each_write {
                writer.flush()?;
            }
            Ok(written)
        });

        match result {
            Ok(written) => self.state.written += written,
            Err(e) => debug!("Failed to write log line: {}", e),
        }
    }

    fn flush(&mut self, options: &SinkOptions) {
        if let Some(writer) = self.shift(options) {
            let _ = writer.flush();
        }
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.state.file.take() {
            let _ = writer.flush();
            debug!("Closed daily log file: {}", self.state.current_path.display());
        }
    }
}

/// Buffer `line` and its newline as one record, returning the bytes added.
///
/// Drains the buffer first when the record would not fit, so a record of up
/// to `MAX_LINE_LEN` bytes is never split across two OS writes.
fn write_line<W: Write>(writer: &mut BufWriter<W>, line: &str) -> io::Result<u64> {
    let len = line.len() + 1;
    if writer.buffer().len() + len > writer.capacity() {
        writer.flush()?;
    }
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(len as u64)
}

/// Delete daily files that fell out of the retention window.
///
/// Removes the files dated `retention_days` through `interval_days` days
/// before today, or only the one at `retention_days` when the interval is
/// shorter. Today's file is never a candidate. Missing files are skipped.
fn sweep_expired(options: &SinkOptions, now: i64, interval_days: i64) {
    let today = local_date(now);
    let keep = u64::from(options.retention_days.max(1));
    let oldest = u64::try_from(interval_days).unwrap_or(0).max(keep);

    for days_ago in keep..=oldest {
        let Some(date) = today.checked_sub_days(Days::new(days_ago)) else {
            break;
        };
        let path = daily_path_for_date(&options.base_path, date);
        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed expired log file: {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!("Failed to remove log file {}: {}", path.display(), e),
        }
    }
}
