//! Reading daily files: tail, follow, and discovery

use chrono::NaiveDate;
use daylog_core::{Result, LOG_EXTENSION};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::clock::Clock;
use crate::rotation::daily_path;

/// A daily file found next to a base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub size: u64,
}

/// List the daily files belonging to `base`, oldest first.
///
/// Matches `{stem}-YYYY-MM-DD.log` in the directory of `base`; anything else
/// in that directory is ignored. A missing directory yields an empty list.
pub fn list_daily_files(base: &str) -> Result<Vec<DailyFile>> {
    let base = Path::new(base);
    let dir = match base.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(stem) = base.file_name().and_then(|n| n.to_str()) else {
        return Ok(vec![]);
    };
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(|n| parse_daily_name(stem, n)) else {
            continue;
        };
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        files.push(DailyFile {
            path: entry.path(),
            date,
            size: metadata.len(),
        });
    }

    files.sort_by_key(|f| f.date);
    Ok(files)
}

/// Date encoded in `name` if it is a daily file of `stem`
fn parse_daily_name(stem: &str, name: &str) -> Option<NaiveDate> {
    let rest = name.strip_prefix(stem)?.strip_prefix('-')?;
    let date = rest.strip_suffix(LOG_EXTENSION)?.strip_suffix('.')?;
    if date.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Base path and clock a following reader uses to find the current day's file
#[derive(Clone)]
struct DailyTarget {
    base: String,
    clock: Arc<dyn Clock>,
}

impl DailyTarget {
    fn current_path(&self) -> PathBuf {
        daily_path(&self.base, self.clock.now().timestamp())
    }
}

/// Log reader for tailing and following a daily file
pub struct LogReader {
    path: PathBuf,
    daily: Option<DailyTarget>,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path, daily: None }
    }

    /// Reader for the daily file of `base` covering `epoch_secs`
    pub fn for_day(base: &str, epoch_secs: i64) -> Self {
        Self::new(daily_path(base, epoch_secs))
    }

    /// Reader for today's file of `base` that keeps up with day rotation.
    ///
    /// When followed, it moves on to the next daily file as soon as that
    /// file exists after `clock` crosses local midnight.
    pub fn daily(base: &str, clock: Arc<dyn Clock>) -> Self {
        let target = DailyTarget {
            base: base.to_string(),
            clock,
        };
        Self {
            path: target.current_path(),
            daily: Some(target),
        }
    }

    /// Read the last N lines from the log file
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut lines: VecDeque<String> = VecDeque::with_capacity(n + 1);

        for line_result in reader.lines() {
            let line = line_result?;
            lines.push_back(line);
            if lines.len() > n {
                lines.pop_front();
            }
        }

        Ok(lines.into_iter().collect())
    }

    /// Read the last N lines by seeking backwards from the end
    pub fn tail_efficient(&self, n: usize) -> Result<Vec<String>> {
        if !self.path.exists() || n == 0 {
            return Ok(vec![]);
        }

        let mut file = File::open(&self.path)?;
        let mut position = file.metadata()?.len();

        // Read chunks from the end until n + 1 newlines guarantee n whole lines
        let chunk_size = 8192u64;
        let mut tail: Vec<u8> = Vec::new();
        let mut newlines = 0;

        while position > 0 && newlines <= n {
            let read_size = std::cmp::min(chunk_size, position);
            position -= read_size;

            file.seek(SeekFrom::Start(position))?;
            let mut chunk = vec![0u8; read_size as usize];
            file.read_exact(&mut chunk)?;

            newlines += chunk.iter().filter(|b| **b == b'\n').count();
            chunk.extend_from_slice(&tail);
            tail = chunk;
        }

        let text = String::from_utf8_lossy(&tail);
        let lines: Vec<&str> = text.lines().collect();
        let skip = lines.len().saturating_sub(n);
        Ok(lines[skip..].iter().map(|l| l.to_string()).collect())
    }

    /// Follow the log file (like tail -f).
    ///
    /// Returns a receiver that yields new lines as they are appended. Must be
    /// called from within a tokio runtime; the watcher runs on the blocking
    /// pool until the receiver is dropped. Only a reader built with
    /// [`LogReader::daily`] follows rotation into the next day's file; any
    /// other reader stays on its fixed path.
    pub fn follow(&self) -> Result<mpsc::Receiver<String>> {
        let path = self.path.clone();
        let daily = self.daily.clone();
        let (tx, rx) = mpsc::channel(100);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = follow_file(&path, daily, tx) {
                debug!("Follow ended: {}", e);
            }
        });

        Ok(rx)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        Ok(std::fs::metadata(&self.path)?.len())
    }
}

/// Stream lines appended to `path` after the call, moving to the next
/// daily file when `daily` is set
fn follow_file(path: &Path, daily: Option<DailyTarget>, tx: mpsc::Sender<String>) -> Result<()> {
    use notify::{RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc as std_mpsc;

    let mut current = path.to_path_buf();
    let mut file = File::open(&current)?;
    let mut position = file.seek(SeekFrom::End(0))?;

    let (watch_tx, watch_rx) = std_mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| {
            let _ = watch_tx.send(res);
        },
        notify::Config::default(),
    )
    .map_err(std::io::Error::other)?;

    watcher
        .watch(&current, RecursiveMode::NonRecursive)
        .map_err(std::io::Error::other)?;

    loop {
        match watch_rx.recv_timeout(std::time::Duration::from_millis(500)) {
            Ok(Ok(_event)) => {}
            Ok(Err(e)) => {
                debug!("Watch error: {}", e);
                continue;
            }
            Err(std_mpsc::RecvTimeoutError::Timeout) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(std_mpsc::RecvTimeoutError::Disconnected) => break,
        }

        let Some(read_to) = send_appended(&file, position, &tx)? else {
            return Ok(());
        };
        position = read_to;

        // The writer creates the next file on its first record after midnight
        let Some(next) = daily.as_ref().map(DailyTarget::current_path) else {
            continue;
        };
        if next == current || !next.exists() {
            continue;
        }

        debug!("Following next daily file: {}", next.display());
        let _ = watcher.unwatch(&current);
        watcher
            .watch(&next, RecursiveMode::NonRecursive)
            .map_err(std::io::Error::other)?;
        file = File::open(&next)?;
        current = next;

        let Some(read_to) = send_appended(&file, 0, &tx)? else {
            return Ok(());
        };
        position = read_to;
    }

    Ok(())
}

/// Send every complete line after `position`.
///
/// Returns the offset after the last line sent, or `None` once the receiver
/// is gone.
fn send_appended(file: &File, position: u64, tx: &mpsc::Sender<String>) -> Result<Option<u64>> {
    let mut position = position;
    if file.metadata()?.len() < position {
        // Truncated by a size rollover, start over from the top
        position = 0;
    }

    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(position))?;
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 || !line.ends_with('\n') {
            break;
        }
        position += read as u64;
        let text = line.trim_end_matches('\n').to_string();
        if tx.blocking_send(text).is_err() {
            return Ok(None);
        }
    }

    Ok(Some(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_tail_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.log");
        File::create(&path).unwrap();

        let reader = LogReader::new(path);
        assert!(reader.tail(10).unwrap().is_empty());
        assert!(reader.tail_efficient(10).unwrap().is_empty());
    }

    #[test]
    fn test_tail_nonexistent_file() {
        let reader = LogReader::new(PathBuf::from("/nonexistent/file.log"));
        assert!(reader.tail(10).unwrap().is_empty());
        assert!(!reader.exists());
        assert_eq!(reader.size().unwrap(), 0);
    }

    #[test]
    fn test_tail_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");

        {
            let mut file = File::create(&path).unwrap();
            for i in 1..=20 {
                writeln!(file, "Line {}", i).unwrap();
            }
        }

        let reader = LogReader::new(path);
        let lines = reader.tail(5).unwrap();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Line 16");
        assert_eq!(lines[4], "Line 20");
    }

    #[test]
    fn test_tail_efficient_matches_tail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");

        {
            let mut file = File::create(&path).unwrap();
            for i in 1..=1000 {
                writeln!(file, "Line {} with some longer content here", i).unwrap();
            }
        }

        let reader = LogReader::new(path);
        for n in [1, 10, 300, 2000] {
            assert_eq!(reader.tail_efficient(n).unwrap(), reader.tail(n).unwrap());
        }
    }

    #[test]
    fn test_tail_efficient_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.log");
        std::fs::write(&path, "a\nb\nc").unwrap();

        let reader = LogReader::new(path);
        assert_eq!(reader.tail_efficient(2).unwrap(), vec!["b", "c"]);
        assert_eq!(reader.tail_efficient(5).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");
        std::fs::write(&path, b"Hello, world!\n").unwrap();

        let reader = LogReader::new(path);
        assert_eq!(reader.size().unwrap(), 14);
    }

    #[test]
    fn test_parse_daily_name() {
        assert_eq!(
            parse_daily_name("app", "app-2024-02-29.log"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_daily_name("app", "app-2024-02-30.log"), None);
        assert_eq!(parse_daily_name("app", "app.log"), None);
        assert_eq!(parse_daily_name("app", "apple-2024-02-01.log"), None);
        assert_eq!(parse_daily_name("app", "app-2024-02-01.txt"), None);
    }

    #[test]
    fn test_list_daily_files() {
        let dir = TempDir::new().unwrap();
        for name in [
            "app-2024-03-02.log",
            "app-2024-03-01.log",
            "app-notes.log",
            "other-2024-03-01.log",
        ] {
            std::fs::write(dir.path().join(name), "x\n").unwrap();
        }

        let base = dir.path().join("app");
        let files = list_daily_files(base.to_str().unwrap()).unwrap();

        let dates: Vec<String> = files.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
        assert!(files.iter().all(|f| f.size == 2));
    }

    #[test]
    fn test_list_daily_files_missing_dir() {
        let files = list_daily_files("/nonexistent/dir/app").unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_follow_yields_appended_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("follow.log");
        std::fs::write(&path, "before\n").unwrap();

        let reader = LogReader::new(path.clone());
        let mut rx = reader.follow().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        {
            let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "after").unwrap();
        }

        let line = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert_eq!(line.as_deref(), Some("after"));
    }

    #[tokio::test]
    async fn test_daily_follow_moves_to_next_day() {
        use crate::clock::ManualClock;
        use chrono::{Local, TimeZone};

        let dir = TempDir::new().unwrap();
        let base = dir.path().join("app").to_string_lossy().into_owned();
        let noon = Local
            .with_ymd_and_hms(2024, 5, 10, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        let clock = Arc::new(ManualClock::new(noon));

        let reader = LogReader::daily(&base, clock.clone());
        assert_eq!(reader.path(), daily_path(&base, noon).as_path());
        std::fs::write(reader.path(), "today\n").unwrap();

        let mut rx = reader.follow().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        clock.advance_days(1);
        let tomorrow = daily_path(&base, clock.now().timestamp());
        assert_ne!(tomorrow.as_path(), reader.path());
        std::fs::write(&tomorrow, "next day\n").unwrap();

        let line = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert_eq!(line.as_deref(), Some("next day"));
    }
}
