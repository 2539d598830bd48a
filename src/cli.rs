//! Command-line argument definition

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskline",
    about = "Line-based personal task tracker with a flat-file store",
    version
)]
pub struct Cli {
    /// Use a different task file
    #[arg(short = 'f', long = "file", env = "TASKLINE_FILE")]
    pub file: Option<PathBuf>,
}

/// Default store location under the platform data directory, e.g.
/// `~/.local/share/taskline/tasks.txt` on Linux.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("taskline").join("tasks.txt"))
}
