//! Record rendering into a bounded line buffer

use chrono::{DateTime, Datelike, Local, Timelike};
use daylog_core::{Level, COLOR_RESET, MAX_LINE_LEN};
use std::fmt::{self, Write};

/// Reusable text buffer with a hard capacity.
///
/// Writes past the limit are cut at the last UTF-8 boundary that fits and
/// the buffer is marked truncated. The backing storage is allocated once.
#[derive(Debug)]
pub struct LineBuffer {
    text: String,
    capacity: usize,
    limit: usize,
    truncated: bool,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            limit: capacity,
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.limit = self.capacity;
        self.truncated = false;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the last render lost text to the capacity limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Hold back `bytes` of capacity for a suffix written after the body
    fn reserve_tail(&mut self, bytes: usize) {
        self.limit = self.capacity.saturating_sub(bytes);
    }

    fn release_tail(&mut self) {
        self.limit = self.capacity;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(MAX_LINE_LEN)
    }
}

impl Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit.saturating_sub(self.text.len());
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&s[..end]);
        self.truncated = true;
        // Stops the formatter from producing the rest of the message
        Err(fmt::Error)
    }
}

/// Render one record as
/// `[color][YYYY-MM-DD HH:MM:SS.mmm][LEVEL]: message[reset]`.
///
/// The color prefix and reset suffix are only written when `color` is on and
/// the level has a color. The reset suffix survives truncation of the body.
/// Returns the rendered length in bytes.
pub fn render(
    buf: &mut LineBuffer,
    level: Level,
    time: &DateTime<Local>,
    args: fmt::Arguments<'_>,
    color: bool,
) -> usize {
    buf.clear();

    let code = if color { level.color() } else { "" };
    if !code.is_empty() {
        buf.reserve_tail(COLOR_RESET.len());
    }

    // A write error only signals truncation
    let _ = render_body(buf, code, level, time, args);

    if !code.is_empty() {
        buf.release_tail();
        let _ = buf.write_str(COLOR_RESET);
    }

    buf.len()
}

fn render_body(
    buf: &mut LineBuffer,
    code: &str,
    level: Level,
    time: &DateTime<Local>,
    args: fmt::Arguments<'_>,
) -> fmt::Result {
    buf.write_str(code)?;
    write!(
        buf,
        "[{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}][{}]: ",
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        time.second(),
        // Leap seconds report up to 1999ms
        time.timestamp_subsec_millis().min(999),
        level.label(),
    )?;
    buf.write_fmt(args)
}
