use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn daylog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("daylog").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn daily_files(dir: &TempDir, stem: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with(&format!("{}-", stem)) && n.ends_with(".log"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_write_creates_daily_file() {
    let dir = TempDir::new().unwrap();

    daylog(&dir)
        .args(["--file", "app.log", "write", "--level", "warn", "disk", "almost", "full"])
        .assert()
        .success();

    let files = daily_files(&dir, "app");
    assert_eq!(files.len(), 1);
    let content = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert!(content.ends_with("[WARN ]: disk almost full\n"));
}

#[test]
fn test_write_appends_across_runs() {
    let dir = TempDir::new().unwrap();

    for msg in ["one", "two", "three"] {
        daylog(&dir).args(["-f", "svc", "write", msg]).assert().success();
    }

    let files = daily_files(&dir, "svc");
    let content = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_write_respects_settings_level() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("daylog.toml"), "level = \"error\"\nfile = \"quiet\"\n").unwrap();

    daylog(&dir).args(["write", "--level", "info", "ignored"]).assert().success();
    assert!(daily_files(&dir, "quiet").is_empty());

    daylog(&dir).args(["write", "--level", "error", "kept"]).assert().success();
    assert_eq!(daily_files(&dir, "quiet").len(), 1);
}

#[test]
fn test_write_rejects_empty_file() {
    let dir = TempDir::new().unwrap();

    daylog(&dir)
        .args(["--file", "", "write", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log file path must not be empty"));
}

#[test]
fn test_write_rejects_unknown_level() {
    let dir = TempDir::new().unwrap();

    daylog(&dir)
        .args(["write", "--level", "loud", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level: loud"));
}

#[test]
fn test_tail_prints_today() {
    let dir = TempDir::new().unwrap();
    for i in 1..=5 {
        daylog(&dir)
            .args(["-f", "app", "write", &format!("message {}", i)])
            .assert()
            .success();
    }

    daylog(&dir)
        .args(["-f", "app", "tail", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("message 4"))
        .stdout(predicate::str::contains("message 5"))
        .stdout(predicate::str::contains("message 3").not());
}

#[test]
fn test_tail_without_file() {
    let dir = TempDir::new().unwrap();

    daylog(&dir)
        .args(["-f", "missing", "tail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No log file for today"));
}

#[test]
fn test_files_lists_daily_files() {
    let dir = TempDir::new().unwrap();
    daylog(&dir).args(["-f", "app", "write", "hello"]).assert().success();
    fs::write(dir.path().join("app-notes.log"), "not a daily file").unwrap();

    let today = daily_files(&dir, "app")
        .into_iter()
        .find(|n| n != "app-notes.log")
        .unwrap();

    daylog(&dir)
        .args(["-f", "app", "files"])
        .assert()
        .success()
        .stdout(predicate::str::contains(today))
        .stdout(predicate::str::contains("app-notes.log").not());
}
