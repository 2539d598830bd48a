//! Command dispatch: one raw input line in, one reply string out
//!
//! The frontend (stdin loop or anything else) only ever sees text;
//! errors are rendered to their messages here so the loop never dies.

use anyhow::Result;

use crate::command::error::{self, CommandError};
use crate::command::{parser, Command};
use crate::storage::Storage;
use crate::task::TaskList;
use crate::ui;

/// Reply to a single input line.
pub enum Reply {
    Continue(String),
    Exit(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Continue(text) | Reply::Exit(text) => text,
        }
    }
}

pub struct App {
    list: TaskList,
    storage: Storage,
}

impl App {
    /// Sets up the backing store and loads whatever it holds.
    pub fn load(storage: Storage) -> Result<Self> {
        storage.ensure_store_exists();
        let list = TaskList::new(storage.load()?);
        Ok(Self { list, storage })
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    /// Handles one command line. Never panics, never ends the process;
    /// `Reply::Exit` is the only way to stop the loop.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::Continue(ui::empty_input());
        }
        let tokens = parser::tokenize(line);
        let command = match Command::from_keyword(&tokens[0]) {
            Some(command) => command,
            None => {
                return Reply::Continue(CommandError::UnknownCommand(tokens[0].clone()).to_string())
            }
        };
        if command == Command::Bye {
            return Reply::Exit(ui::farewell());
        }
        Reply::Continue(
            self.dispatch(command, &tokens)
                .unwrap_or_else(|err| err.to_string()),
        )
    }

    fn dispatch(&mut self, command: Command, tokens: &[String]) -> error::Result<String> {
        match command {
            Command::Todo | Command::Deadline | Command::Event => {
                self.list.add(tokens, &self.storage)
            }
            Command::List => Ok(self.list.render()),
            Command::Mark => self.list.mark(parse_index(tokens)?, &self.storage),
            Command::Unmark => self.list.unmark(parse_index(tokens)?, &self.storage),
            Command::Delete => self.list.delete(parse_index(tokens)?, &self.storage),
            Command::Find => self.list.find(tokens),
            Command::Edit => {
                let index = parse_index(tokens)?;
                let selector = tokens.get(2).map(String::as_str).unwrap_or_default();
                self.list.edit(index, selector, tokens, &self.storage)
            }
            Command::Bye => unreachable!("bye is handled in handle_line"),
        }
    }
}

/// Reads the 1-based index argument. A missing or non-numeric token is
/// an invalid index, not a panic.
fn parse_index(tokens: &[String]) -> error::Result<usize> {
    tokens
        .get(1)
        .and_then(|token| token.parse().ok())
        .ok_or(CommandError::InvalidIndex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_app() -> (tempfile::TempDir, App) {
        let temp = tempfile::tempdir().unwrap();
        let app = App::load(Storage::new(temp.path().join("tasks.txt"))).unwrap();
        (temp, app)
    }

    #[test]
    fn test_blank_line_gets_a_nudge() {
        let (_temp, mut app) = temp_app();
        let reply = app.handle_line("   ");
        assert!(matches!(reply, Reply::Continue(_)));
        assert!(reply.text().contains("Type a command"));
    }

    #[test]
    fn test_unknown_command_keeps_looping() {
        let (_temp, mut app) = temp_app();
        let reply = app.handle_line("remind me later");
        assert!(matches!(reply, Reply::Continue(_)));
        assert!(reply.text().contains("remind"));
    }

    #[test]
    fn test_bye_exits() {
        let (_temp, mut app) = temp_app();
        assert!(matches!(app.handle_line("bye"), Reply::Exit(_)));
    }

    #[test]
    fn test_non_numeric_index_is_invalid_index() {
        let (_temp, mut app) = temp_app();
        app.handle_line("todo read book");
        let reply = app.handle_line("mark one");
        assert!(reply.text().contains("doesn't point at anything"));
        assert!(!app.list().tasks()[0].done);
    }
}
