//! Terminal output helpers

use colored::Colorize;
use daylog_logs::DailyFile;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print daily files as an aligned listing
pub fn print_files(files: &[DailyFile]) {
    println!("{:<12} {:>10}  {}", "date".bold(), "size".bold(), "path".bold());
    for file in files {
        println!(
            "{:<12} {:>10}  {}",
            file.date.to_string(),
            format_size(file.size),
            file.path.display()
        );
    }
}

/// Format bytes as a short human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
