//! Taskline - line-based personal task tracker

use std::io::{self, BufRead};

use anyhow::{anyhow, Result};
use clap::Parser;

use taskline::app::{App, Reply};
use taskline::cli::{default_store_path, Cli};
use taskline::storage::Storage;
use taskline::ui;

fn main() -> Result<()> {
    if std::env::var("TASKLINE_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskline=debug")
            .init();
    }

    let cli = Cli::parse();
    let store_path = cli
        .file
        .or_else(default_store_path)
        .ok_or_else(|| anyhow!("could not determine a data directory for the task file"))?;

    let mut app = App::load(Storage::new(store_path))?;

    println!("{}", ui::greeting());
    for line in io::stdin().lock().lines() {
        match app.handle_line(&line?) {
            Reply::Continue(reply) => println!("{reply}"),
            Reply::Exit(reply) => {
                println!("{reply}");
                break;
            }
        }
    }
    Ok(())
}
