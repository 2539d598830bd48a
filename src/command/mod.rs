//! Command surface: keyword table, tokenizer and field parsers

pub mod error;
pub mod parser;

pub use error::CommandError;

/// One supported command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Todo,
    Deadline,
    Event,
    List,
    Mark,
    Unmark,
    Delete,
    Find,
    Edit,
    Bye,
}

impl Command {
    /// Looks up the command for the first token of a line.
    /// Keywords are case-sensitive.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "todo" => Some(Self::Todo),
            "deadline" => Some(Self::Deadline),
            "event" => Some(Self::Event),
            "list" => Some(Self::List),
            "mark" => Some(Self::Mark),
            "unmark" => Some(Self::Unmark),
            "delete" => Some(Self::Delete),
            "find" => Some(Self::Find),
            "edit" => Some(Self::Edit),
            "bye" => Some(Self::Bye),
            _ => None,
        }
    }
}
