//! Task data model

use chrono::NaiveDateTime;
use std::fmt;

/// Display format for dates inside reply strings, e.g. `2 Dec 2024 18:00`.
const DISPLAY_DATE_FMT: &str = "%-d %b %Y %H:%M";

/// Task kind, derived from the schedule variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    /// Single-letter tag used in the stored file.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }

    /// Lowercase name as it appears in commands and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Deadline => "deadline",
            Self::Event => "event",
        }
    }
}

/// Date information attached to a task. `None` is a plain todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    None,
    Deadline {
        due: NaiveDateTime,
    },
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A single tracked task.
///
/// `content` is never empty or whitespace-only: the command parser and
/// the storage loader both reject blank content before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub content: String,
    pub done: bool,
    pub schedule: Schedule,
}

impl Task {
    pub fn todo(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            done: false,
            schedule: Schedule::None,
        }
    }

    pub fn deadline(content: impl Into<String>, due: NaiveDateTime) -> Self {
        Self {
            content: content.into(),
            done: false,
            schedule: Schedule::Deadline { due },
        }
    }

    pub fn event(content: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            content: content.into(),
            done: false,
            schedule: Schedule::Event { start, end },
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self.schedule {
            Schedule::None => TaskKind::Todo,
            Schedule::Deadline { .. } => TaskKind::Deadline,
            Schedule::Event { .. } => TaskKind::Event,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.done { "X" } else { " " };
        write!(f, "[{}][{}] {}", self.kind().icon(), status, self.content)?;
        match &self.schedule {
            Schedule::None => Ok(()),
            Schedule::Deadline { due } => {
                write!(f, " (by: {})", due.format(DISPLAY_DATE_FMT))
            }
            Schedule::Event { start, end } => {
                write!(
                    f,
                    " (from: {} to: {})",
                    start.format(DISPLAY_DATE_FMT),
                    end.format(DISPLAY_DATE_FMT)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_kind_follows_schedule() {
        assert_eq!(Task::todo("a").kind(), TaskKind::Todo);
        assert_eq!(
            Task::deadline("a", dt(2024, 12, 2, 18, 0)).kind(),
            TaskKind::Deadline
        );
        assert_eq!(
            Task::event("a", dt(2024, 12, 2, 8, 0), dt(2024, 12, 2, 18, 0)).kind(),
            TaskKind::Event
        );
    }

    #[test]
    fn test_display_todo() {
        let mut task = Task::todo("read book");
        assert_eq!(task.to_string(), "[T][ ] read book");
        task.done = true;
        assert_eq!(task.to_string(), "[T][X] read book");
    }

    #[test]
    fn test_display_deadline() {
        let task = Task::deadline("submit report", dt(2024, 12, 2, 18, 0));
        assert_eq!(
            task.to_string(),
            "[D][ ] submit report (by: 2 Dec 2024 18:00)"
        );
    }

    #[test]
    fn test_display_event() {
        let task = Task::event("camp", dt(2026, 6, 1, 8, 0), dt(2026, 6, 2, 18, 0));
        assert_eq!(
            task.to_string(),
            "[E][ ] camp (from: 1 Jun 2026 08:00 to: 2 Jun 2026 18:00)"
        );
    }
}
