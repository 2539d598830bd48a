//! Reply-string formatting
//!
//! The core never renders for a particular surface; every handler hands
//! plain text to whatever frontend issued the command.

use crate::task::Task;

pub fn greeting() -> String {
    "Hello! I'm taskline.\nWhat can I do for you?".to_string()
}

pub fn farewell() -> String {
    "Bye. Hope to see you again soon!".to_string()
}

pub fn empty_input() -> String {
    "Type a command, for example 'list' or 'todo read book'.".to_string()
}

pub fn added(task: &Task, total: usize) -> String {
    format!(
        "Got it. I've added this task:\n  {}\n{}",
        task,
        count_line(total)
    )
}

pub fn marked(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n  {}", task)
}

pub fn unmarked(task: &Task) -> String {
    format!("OK, I've marked this task as not done yet:\n  {}", task)
}

pub fn deleted(task: &Task, total: usize) -> String {
    format!(
        "Noted. I've removed this task:\n  {}\n{}",
        task,
        count_line(total)
    )
}

pub fn updated(task: &Task) -> String {
    format!("Got it. I've updated this task:\n  {}", task)
}

pub fn listing(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Your list is empty. Add something with todo, deadline or event.".to_string();
    }
    let mut out = String::from("Here are the tasks in your list:");
    for (index, task) in tasks.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", index + 1, task));
    }
    out
}

/// Matches keep their original 1-based indices so a follow-up mark or
/// delete can use them directly.
pub fn found(matches: &[(usize, &Task)]) -> String {
    if matches.is_empty() {
        return "No matching tasks found.".to_string();
    }
    let mut out = String::from("Here are the matching tasks in your list:");
    for (index, task) in matches {
        out.push_str(&format!("\n{}. {}", index, task));
    }
    out
}

fn count_line(total: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", total, noun)
}
