use thiserror::Error;

use crate::storage::StorageError;

/// Everything a command handler can report back to the user.
///
/// None of these abort the line loop; each renders to a distinct
/// human-readable reply.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(
        "I don't recognise the command '{0}'.\n\
         Supported: todo, deadline, event, list, mark, unmark, delete, find, edit, bye"
    )]
    UnknownCommand(String),

    #[error("That task number doesn't point at anything in your list.")]
    InvalidIndex,

    #[error("'{0}' is not a task type I can add. Use todo, deadline or event.")]
    UnsupportedKind(String),

    #[error("A todo needs some content and takes no /by, /from or to markers.")]
    TodoFormat,

    #[error("A deadline looks like: deadline <content> /by <date>")]
    DeadlineFormat,

    #[error("An event looks like: event <content> /from <date> /to <date>")]
    EventFormat,

    #[error("An event cannot end before it starts.")]
    EventOrder,

    #[error("find takes exactly one word to search for.")]
    FindFormat,

    #[error("I couldn't read '{0}' as a date. Use yyyy-M-d [Hmm] or d/M/yyyy [Hmm].")]
    UnsupportedDateTime(String),

    #[error("A {kind} task has no {field} field to edit.")]
    TypeMismatch {
        field: &'static str,
        kind: &'static str,
    },

    #[error("'{0}' is not an editable field. Use /content, /by, /from or /to.")]
    UnknownField(String),

    #[error("The new content cannot be blank.")]
    EmptyContent,

    #[error("The new date cannot be blank.")]
    EmptyDate,

    #[error("Task content cannot contain the ' / ' sequence; it separates fields in the task file.")]
    SeparatorInContent,

    #[error("Failed saving your tasks to disk; the change was rolled back. ({0})")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
