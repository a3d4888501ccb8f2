//! Launcher output: tab headers, record rows and per-file status lines.
//!
//! Row formatting is split from printing so listings can be checked
//! without capturing stdout.

use sonolight_core::RecordId;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;
/// Width of a hyphenated UUID.
const ID_WIDTH: usize = 36;
const LABEL_WIDTH: usize = 12;
const MISSING_ID: &str = "(no id)";

/// Outcome shown in front of a collection file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Ok,
    Missing,
    Failed,
}

impl FileStatus {
    fn marker(self) -> char {
        match self {
            Self::Ok => '✓',
            Self::Missing => '⚠',
            Self::Failed => '✗',
        }
    }
}

/// Prints a tab or command header, with the record count when known.
pub fn header(title: &str, count: Option<usize>) {
    println!();
    match count {
        Some(count) => println!("{title} ({count})"),
        None => println!("{title}"),
    }
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Prints an aligned `label value` line.
pub fn field(label: &str, value: impl Display) {
    println!("{label:<LABEL_WIDTH$} {value}");
}

pub fn record_row(id: Option<RecordId>, summary: &str) -> String {
    let id = id.map_or_else(|| MISSING_ID.to_string(), |id| id.to_string());
    format!("{id:<ID_WIDTH$}  {summary}")
}

pub fn print_record_row(id: Option<RecordId>, summary: &str) {
    println!("{}", record_row(id, summary));
}

pub fn file_line(status: FileStatus, message: &str) -> String {
    format!("{} {message}", status.marker())
}

/// Prints a file status line; failures go to stderr.
pub fn file_status(status: FileStatus, message: &str) {
    let line = file_line(status, message);
    if status == FileStatus::Failed {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Prints a confirmation for a created record or file.
pub fn created(what: &str, name: impl Display) {
    println!("✓ {what} created: {name}");
}

/// Prints a command failure on stderr.
pub fn error(message: &str) {
    eprintln!("{}", file_line(FileStatus::Failed, message));
}

/// Prints raw text such as a pretty JSON record.
pub fn raw(text: &str) {
    println!("{text}");
}
