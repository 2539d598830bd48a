//! Flat-file task persistence
//!
//! One record per line: `<icon> / <0|1> / <content>[ / <date>[ / <date>]]`
//! with dates formatted `d/M/yyyy Hmm`. The field count selects the kind
//! on load: 3 is a todo, 4 a deadline, 5 an event.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::warn;

use crate::command::parser;
use crate::task::{Schedule, Task};

/// Stored date format, e.g. `2/12/2024 1800`.
const STORED_DATE_FMT: &str = "%-d/%-m/%Y %-H%M";

/// Record field separator. Content is forbidden from containing this
/// sequence so the field count stays unambiguous on load.
pub(crate) const FIELD_SEP: &str = " / ";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("task file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns the backing file path for the lifetime of the process.
/// Constructed once at startup and passed by reference to the task list.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotently creates the parent directory and the file. Failures
    /// are logged and swallowed: a missing store surfaces later as a
    /// save error on the first mutation, not as a startup crash.
    pub fn ensure_store_exists(&self) {
        if let Some(dir) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(dir) {
                warn!("failed to create task directory {}: {}", dir.display(), err);
                return;
            }
        }
        if !self.path.exists() {
            if let Err(err) = fs::write(&self.path, "") {
                warn!("failed to create task file {}: {}", self.path.display(), err);
            }
        }
    }

    /// Rewrites the whole file from the given sequence.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut out = String::new();
        for task in tasks {
            out.push_str(&serialize_record(task));
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    /// Loads the stored sequence. A missing file loads as an empty list.
    /// Malformed records are skipped with a warning rather than failing
    /// the whole load.
    pub fn load(&self) -> Result<Vec<Task>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut tasks = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Some(task) => tasks.push(task),
                None => warn!(
                    "skipping malformed record at {}:{}",
                    self.path.display(),
                    number + 1
                ),
            }
        }
        Ok(tasks)
    }
}

fn serialize_record(task: &Task) -> String {
    let done = if task.done { "1" } else { "0" };
    let mut line = format!(
        "{}{FIELD_SEP}{}{FIELD_SEP}{}",
        task.kind().icon(),
        done,
        task.content
    );
    match &task.schedule {
        Schedule::None => {}
        Schedule::Deadline { due } => {
            line.push_str(&format!("{FIELD_SEP}{}", due.format(STORED_DATE_FMT)));
        }
        Schedule::Event { start, end } => {
            line.push_str(&format!(
                "{FIELD_SEP}{}{FIELD_SEP}{}",
                start.format(STORED_DATE_FMT),
                end.format(STORED_DATE_FMT)
            ));
        }
    }
    line
}

/// Rebuilds a task from one stored line, or `None` if the record is
/// corrupt (bad icon or flag, blank content, unparseable date, event
/// ending before it starts, unexpected field count).
fn parse_record(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();
    if !matches!(*fields.first()?, "T" | "D" | "E") {
        return None;
    }
    let done = match *fields.get(1)? {
        "0" => false,
        "1" => true,
        _ => return None,
    };
    let content = fields.get(2)?.trim();
    if content.is_empty() {
        return None;
    }

    let mut task = match fields.len() {
        3 => Task::todo(content),
        4 => Task::deadline(content, parse_stored_date(fields[3])?),
        5 => {
            let start = parse_stored_date(fields[3])?;
            let end = parse_stored_date(fields[4])?;
            if start > end {
                return None;
            }
            Task::event(content, start, end)
        }
        _ => return None,
    };
    task.done = done;
    Some(task)
}

fn parse_stored_date(raw: &str) -> Option<NaiveDateTime> {
    parser::parse_date_time(raw).ok()
}
