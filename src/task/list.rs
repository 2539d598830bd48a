//! Ordered task collection and the command handlers that mutate it
//!
//! Every mutating handler follows the same discipline: apply the
//! in-memory transition, save the whole list, and undo the transition
//! if the save fails. A success reply therefore never claims more than
//! what is durably on disk.

use chrono::NaiveDateTime;

use crate::command::error::{CommandError, Result};
use crate::command::parser;
use crate::storage::Storage;
use crate::task::{Schedule, Task};
use crate::ui;

#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

/// Prior value of an edited field, kept for rollback.
enum FieldEdit {
    Content(String),
    Due(NaiveDateTime),
    Start(NaiveDateTime),
    End(NaiveDateTime),
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Adds a task, dispatching on the command keyword in `tokens[0]`.
    pub fn add(&mut self, tokens: &[String], storage: &Storage) -> Result<String> {
        let task = match tokens.first().map(String::as_str) {
            Some("todo") => Task::todo(parser::parse_todo(tokens)?),
            Some("deadline") => {
                let (content, due_raw) = parser::parse_deadline(tokens)?;
                Task::deadline(content, parser::parse_date_time(&due_raw)?)
            }
            Some("event") => {
                let (content, start_raw, end_raw) = parser::parse_event(tokens)?;
                let start = parser::parse_date_time(&start_raw)?;
                let end = parser::parse_date_time(&end_raw)?;
                if start > end {
                    return Err(CommandError::EventOrder);
                }
                Task::event(content, start, end)
            }
            other => {
                return Err(CommandError::UnsupportedKind(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        self.tasks.push(task);
        if let Err(err) = storage.save(&self.tasks) {
            self.tasks.pop();
            return Err(err.into());
        }
        Ok(ui::added(&self.tasks[self.tasks.len() - 1], self.tasks.len()))
    }

    pub fn mark(&mut self, index: usize, storage: &Storage) -> Result<String> {
        self.set_done(index, true, storage)
    }

    pub fn unmark(&mut self, index: usize, storage: &Storage) -> Result<String> {
        self.set_done(index, false, storage)
    }

    fn set_done(&mut self, index: usize, done: bool, storage: &Storage) -> Result<String> {
        let i = self.resolve(index)?;
        let prev = self.tasks[i].done;
        self.tasks[i].done = done;
        if let Err(err) = storage.save(&self.tasks) {
            self.tasks[i].done = prev;
            return Err(err.into());
        }
        Ok(if done {
            ui::marked(&self.tasks[i])
        } else {
            ui::unmarked(&self.tasks[i])
        })
    }

    pub fn delete(&mut self, index: usize, storage: &Storage) -> Result<String> {
        let i = self.resolve(index)?;
        let task = self.tasks.remove(i);
        if let Err(err) = storage.save(&self.tasks) {
            self.tasks.insert(i, task);
            return Err(err.into());
        }
        Ok(ui::deleted(&task, self.tasks.len()))
    }

    /// Case-sensitive substring search over task content. Read-only.
    pub fn find(&self, tokens: &[String]) -> Result<String> {
        let phrase = parser::parse_find(tokens)?;
        let matches: Vec<(usize, &Task)> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.content.contains(&phrase))
            .map(|(i, task)| (i + 1, task))
            .collect();
        Ok(ui::found(&matches))
    }

    /// Replaces one field of the task at `index`. The selector chooses
    /// the field; date selectors only apply to the kind that carries
    /// that date.
    pub fn edit(
        &mut self,
        index: usize,
        selector: &str,
        tokens: &[String],
        storage: &Storage,
    ) -> Result<String> {
        let i = self.resolve(index)?;
        let rollback = self.apply_edit(i, selector, tokens)?;
        if let Err(err) = storage.save(&self.tasks) {
            self.undo_edit(i, rollback);
            return Err(err.into());
        }
        Ok(ui::updated(&self.tasks[i]))
    }

    /// Renders the numbered listing for the `list` command.
    pub fn render(&self) -> String {
        ui::listing(&self.tasks)
    }

    /// Converts a 1-based user index into a vector position.
    /// Valid range is `1..=len`.
    fn resolve(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(CommandError::InvalidIndex);
        }
        Ok(index - 1)
    }

    fn apply_edit(&mut self, i: usize, selector: &str, tokens: &[String]) -> Result<FieldEdit> {
        let kind = self.tasks[i].kind();
        let task = &mut self.tasks[i];
        match selector {
            "/content" => {
                let content = parser::parse_update_text(tokens);
                if content.is_empty() {
                    return Err(CommandError::EmptyContent);
                }
                if content.contains(crate::storage::FIELD_SEP) {
                    return Err(CommandError::SeparatorInContent);
                }
                let prev = std::mem::replace(&mut task.content, content);
                Ok(FieldEdit::Content(prev))
            }
            "/by" => {
                let due = parser::parse_update_date(tokens)?;
                match &mut task.schedule {
                    Schedule::Deadline { due: slot } => {
                        Ok(FieldEdit::Due(std::mem::replace(slot, due)))
                    }
                    _ => Err(CommandError::TypeMismatch {
                        field: "/by",
                        kind: kind.name(),
                    }),
                }
            }
            "/from" => {
                let start = parser::parse_update_date(tokens)?;
                match &mut task.schedule {
                    Schedule::Event { start: slot, end } => {
                        if start > *end {
                            return Err(CommandError::EventOrder);
                        }
                        Ok(FieldEdit::Start(std::mem::replace(slot, start)))
                    }
                    _ => Err(CommandError::TypeMismatch {
                        field: "/from",
                        kind: kind.name(),
                    }),
                }
            }
            "/to" => {
                let end = parser::parse_update_date(tokens)?;
                match &mut task.schedule {
                    Schedule::Event { start, end: slot } => {
                        if end < *start {
                            return Err(CommandError::EventOrder);
                        }
                        Ok(FieldEdit::End(std::mem::replace(slot, end)))
                    }
                    _ => Err(CommandError::TypeMismatch {
                        field: "/to",
                        kind: kind.name(),
                    }),
                }
            }
            other => Err(CommandError::UnknownField(other.to_string())),
        }
    }

    fn undo_edit(&mut self, i: usize, edit: FieldEdit) {
        let task = &mut self.tasks[i];
        match (edit, &mut task.schedule) {
            (FieldEdit::Content(prev), _) => task.content = prev,
            (FieldEdit::Due(prev), Schedule::Deadline { due }) => *due = prev,
            (FieldEdit::Start(prev), Schedule::Event { start, .. }) => *start = prev,
            (FieldEdit::End(prev), Schedule::Event { end, .. }) => *end = prev,
            // An edit only ever touches the variant it matched.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parser::tokenize;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let temp = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp.path().join("tasks.txt"));
        (temp, storage)
    }

    /// A storage whose path is a directory, so every save fails.
    fn broken_storage() -> (tempfile::TempDir, Storage) {
        let temp = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        (temp, storage)
    }

    fn seeded_list() -> TaskList {
        TaskList::new(vec![
            Task::todo("read book"),
            Task::deadline("submit report", dt(2024, 12, 2, 18, 0)),
            Task::event("camp", dt(2026, 6, 1, 8, 0), dt(2026, 6, 2, 18, 0)),
        ])
    }

    #[test]
    fn test_add_each_kind() {
        let (_temp, storage) = temp_storage();
        let mut list = TaskList::default();

        list.add(&tokenize("todo read book"), &storage).unwrap();
        list.add(&tokenize("deadline submit report /by 2/12/2024 1800"), &storage)
            .unwrap();
        list.add(
            &tokenize("event camp /from 1/6/2026 800 /to 2/6/2026 1800"),
            &storage,
        )
        .unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.tasks()[0].content, "read book");
        assert_eq!(
            list.tasks()[1].schedule,
            Schedule::Deadline {
                due: dt(2024, 12, 2, 18, 0)
            }
        );
        assert_eq!(
            list.tasks()[2].schedule,
            Schedule::Event {
                start: dt(2026, 6, 1, 8, 0),
                end: dt(2026, 6, 2, 18, 0)
            }
        );
    }

    #[test]
    fn test_add_rejects_inverted_event() {
        let (_temp, storage) = temp_storage();
        let mut list = TaskList::default();
        let err = list
            .add(
                &tokenize("event camp /from 2/6/2026 1800 /to 1/6/2026 800"),
                &storage,
            )
            .unwrap_err();
        assert!(matches!(err, CommandError::EventOrder));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_invalid_date_mutates_nothing() {
        let (_temp, storage) = temp_storage();
        let mut list = TaskList::default();
        let err = list
            .add(&tokenize("deadline submit /by whenever"), &storage)
            .unwrap_err();
        assert!(matches!(err, CommandError::UnsupportedDateTime(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_rolls_back_on_save_failure() {
        let (_temp, storage) = broken_storage();
        let mut list = TaskList::default();
        let err = list.add(&tokenize("todo read book"), &storage).unwrap_err();
        assert!(matches!(err, CommandError::Storage(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_mark_then_unmark_restores_initial_state() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();
        let before = list.tasks().to_vec();

        list.mark(2, &storage).unwrap();
        assert!(list.tasks()[1].done);
        list.unmark(2, &storage).unwrap();
        assert_eq!(list.tasks(), &before[..]);
    }

    #[test]
    fn test_mark_rolls_back_on_save_failure() {
        let (_temp, storage) = broken_storage();
        let mut list = seeded_list();
        let err = list.mark(1, &storage).unwrap_err();
        assert!(matches!(err, CommandError::Storage(_)));
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_index_bounds() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();

        assert!(matches!(
            list.mark(0, &storage).unwrap_err(),
            CommandError::InvalidIndex
        ));
        // len + 1 is out of range too: the historical one-past-the-end
        // acceptance is not kept.
        assert!(matches!(
            list.mark(4, &storage).unwrap_err(),
            CommandError::InvalidIndex
        ));
        assert!(list.mark(3, &storage).is_ok());
    }

    #[test]
    fn test_delete_preserves_relative_order() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();

        list.delete(2, &storage).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].content, "read book");
        assert_eq!(list.tasks()[1].content, "camp");
    }

    #[test]
    fn test_delete_rolls_back_on_save_failure() {
        let (_temp, storage) = broken_storage();
        let mut list = seeded_list();
        let before = list.tasks().to_vec();

        let err = list.delete(2, &storage).unwrap_err();
        assert!(matches!(err, CommandError::Storage(_)));
        assert_eq!(list.tasks(), &before[..]);
    }

    #[test]
    fn test_find_matches_substring_in_order() {
        let list = seeded_list();
        let out = list.find(&tokenize("find book")).unwrap();
        assert!(out.contains("1. [T][ ] read book"));
        assert!(!out.contains("submit report"));

        let none = list.find(&tokenize("find Book")).unwrap();
        assert_eq!(none, "No matching tasks found.");
    }

    #[test]
    fn test_find_rejects_multiple_words() {
        let list = seeded_list();
        assert!(matches!(
            list.find(&tokenize("find read book")).unwrap_err(),
            CommandError::FindFormat
        ));
    }

    #[test]
    fn test_edit_content_any_kind() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();
        list.edit(1, "/content", &tokenize("edit 1 /content read two books"), &storage)
            .unwrap();
        assert_eq!(list.tasks()[0].content, "read two books");
    }

    #[test]
    fn test_edit_by_only_on_deadline() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();

        list.edit(2, "/by", &tokenize("edit 2 /by 3/12/2024 900"), &storage)
            .unwrap();
        assert_eq!(
            list.tasks()[1].schedule,
            Schedule::Deadline {
                due: dt(2024, 12, 3, 9, 0)
            }
        );

        let err = list
            .edit(1, "/by", &tokenize("edit 1 /by 3/12/2024 900"), &storage)
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::TypeMismatch { field: "/by", kind: "todo" }
        ));
    }

    #[test]
    fn test_edit_event_bounds_checked() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();

        list.edit(3, "/from", &tokenize("edit 3 /from 1/6/2026 900"), &storage)
            .unwrap();
        assert_eq!(
            list.tasks()[2].schedule,
            Schedule::Event {
                start: dt(2026, 6, 1, 9, 0),
                end: dt(2026, 6, 2, 18, 0)
            }
        );

        // Moving the end before the start is rejected without mutation.
        let before = list.tasks()[2].clone();
        let err = list
            .edit(3, "/to", &tokenize("edit 3 /to 1/6/2026 800"), &storage)
            .unwrap_err();
        assert!(matches!(err, CommandError::EventOrder));
        assert_eq!(list.tasks()[2], before);
    }

    #[test]
    fn test_edit_content_rejects_field_separator() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();
        let err = list
            .edit(1, "/content", &tokenize("edit 1 /content a / b"), &storage)
            .unwrap_err();
        assert!(matches!(err, CommandError::SeparatorInContent));
        assert_eq!(list.tasks()[0].content, "read book");
    }

    #[test]
    fn test_edit_unknown_selector() {
        let (_temp, storage) = temp_storage();
        let mut list = seeded_list();
        let err = list
            .edit(1, "/due", &tokenize("edit 1 /due 3/12/2024"), &storage)
            .unwrap_err();
        assert!(matches!(err, CommandError::UnknownField(_)));
    }

    #[test]
    fn test_edit_rolls_back_on_save_failure() {
        let (_temp, storage) = broken_storage();
        let mut list = seeded_list();
        let before = list.tasks().to_vec();

        let err = list
            .edit(1, "/content", &tokenize("edit 1 /content new text"), &storage)
            .unwrap_err();
        assert!(matches!(err, CommandError::Storage(_)));
        assert_eq!(list.tasks(), &before[..]);
    }
}
