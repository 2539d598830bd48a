//! Taskline library - command parsing, task list mutation and
//! flat-file persistence for the `taskline` binary

pub mod app;
pub mod cli;
pub mod command;
pub mod storage;
pub mod task;
pub mod ui;
