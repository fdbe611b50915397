//! Library catalog manager.
//!
//! Keeps the catalog in `library.json` under the data directory. With no
//! command, runs the interactive menu.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shelf::cli::{self, Command};
use shelf::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "shelf",
    version,
    about = "Track a small library's books, loans, and returns"
)]
struct Cli {
    /// Directory holding `library.json` and `shelf.toml`.
    #[arg(long, global = true, env = "SHELF_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let args = Cli::parse();
    let command = args.command.unwrap_or(Command::Menu);
    let stdout = std::io::stdout();
    cli::run(&args.data_dir, command, &mut stdout.lock())
}
