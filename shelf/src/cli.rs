//! CLI command implementations.
//!
//! Each command opens the library under the data directory, runs one
//! operation, prints the user-facing result to `out`, and returns the process
//! exit code. Loan failures are reported on stderr and mapped through
//! [`exit_codes::for_error`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::debug;

use crate::core::render::BookLine;
use crate::core::search::{SearchMode, SearchOutcome};
use crate::core::types::BookId;
use crate::error::LoanError;
use crate::exit_codes;
use crate::io::clock::{Clock, SystemClock};
use crate::io::config::{ShelfConfig, load_config, render_config, write_config};
use crate::io::paths::ShelfPaths;
use crate::menu::{Menu, return_message};
use crate::ops::{Library, SaveStatus};
use crate::validate::validate_catalog_file;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu (the default when no command is given).
    Menu,
    /// Add a book and print its id.
    Add { title: String, author: String },
    /// List every book in catalog order.
    List,
    /// Search by id, title, or author (title/author match case-insensitive substrings).
    Search(SearchArgs),
    /// Lend a book to a borrower.
    Issue { id: BookId, borrower: String },
    /// Take a book back and report any late fine.
    Return { id: BookId },
    /// Permanently remove a book.
    Delete { id: BookId },
    /// Write the catalog as plain text.
    Export {
        /// Destination file (defaults to the configured export file).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the catalog file against its schema and invariants.
    Validate,
    /// Print the effective configuration.
    Config {
        /// Write the effective configuration to `shelf.toml`.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SearchArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
}

impl SearchArgs {
    fn mode_and_query(&self) -> (SearchMode, &str) {
        if let Some(id) = &self.id {
            (SearchMode::Id, id)
        } else if let Some(title) = &self.title {
            (SearchMode::Title, title)
        } else {
            (SearchMode::Author, self.author.as_deref().unwrap_or_default())
        }
    }
}

/// Run `command` against the library in `data_dir` using the system clock.
pub fn run<W: Write>(data_dir: &Path, command: Command, out: &mut W) -> Result<i32> {
    run_with_clock(data_dir, command, SystemClock, out)
}

pub fn run_with_clock<C: Clock, W: Write>(
    data_dir: &Path,
    command: Command,
    clock: C,
    out: &mut W,
) -> Result<i32> {
    let paths = ShelfPaths::new(data_dir);
    let config = load_config(&paths.config_path)?;
    debug!(data_dir = %data_dir.display(), ?command, "running command");

    match command {
        Command::Validate => return cmd_validate(&paths, &config, out),
        Command::Config { write } => return cmd_config(&paths, &config, write, out),
        _ => {}
    }

    let currency = config.currency.clone();
    let mut library = Library::open(&paths, config, clock);
    match command {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(&mut library, &currency, stdin.lock(), out).run()?;
            Ok(exit_codes::OK)
        }
        Command::Add { title, author } => match library.add(&title, &author) {
            Ok(added) => {
                writeln!(out, "Book added with ID {}", added.value)?;
                Ok(save_exit_code(&added.save))
            }
            Err(err) => Ok(report_error(&err)),
        },
        Command::List => {
            match library.list() {
                None => writeln!(out, "No books in library.")?,
                Some(books) => {
                    for book in books {
                        writeln!(out, "{}", BookLine(book))?;
                    }
                }
            }
            Ok(exit_codes::OK)
        }
        Command::Search(args) => {
            let (mode, query) = args.mode_and_query();
            match library.search(mode, query) {
                Ok(SearchOutcome::NotFound) => {
                    writeln!(out, "Book not found.")?;
                    Ok(exit_codes::NOT_FOUND)
                }
                Ok(SearchOutcome::NoMatches) => {
                    writeln!(out, "No matching books.")?;
                    Ok(exit_codes::NOT_FOUND)
                }
                Ok(outcome) => {
                    for book in outcome.books() {
                        writeln!(out, "{}", BookLine(book))?;
                    }
                    Ok(exit_codes::OK)
                }
                Err(err) => Ok(report_error(&err)),
            }
        }
        Command::Issue { id, borrower } => match library.issue(id, &borrower) {
            Ok(issued) => {
                writeln!(
                    out,
                    "Book issued to {}. Due date: {}",
                    issued.value.borrower,
                    issued.value.due_date.format("%Y-%m-%d")
                )?;
                Ok(save_exit_code(&issued.save))
            }
            Err(err) => Ok(report_error(&err)),
        },
        Command::Return { id } => match library.return_book(id) {
            Ok(returned) => {
                writeln!(out, "{}", return_message(&returned.value, &currency))?;
                Ok(save_exit_code(&returned.save))
            }
            Err(err) => Ok(report_error(&err)),
        },
        Command::Delete { id } => match library.delete(id) {
            Ok(deleted) => {
                writeln!(out, "Book deleted.")?;
                Ok(save_exit_code(&deleted.save))
            }
            Err(err) => Ok(report_error(&err)),
        },
        Command::Export { output } => match library.export(output.as_deref()) {
            Ok(receipt) => {
                writeln!(
                    out,
                    "Exported {} books to {}",
                    receipt.count,
                    receipt.path.display()
                )?;
                Ok(exit_codes::OK)
            }
            Err(err) => {
                eprintln!("Failed to export: {err}");
                Ok(exit_codes::for_error(&err))
            }
        },
        Command::Validate | Command::Config { .. } => Ok(exit_codes::OK),
    }
}

fn cmd_validate<W: Write>(paths: &ShelfPaths, config: &ShelfConfig, out: &mut W) -> Result<i32> {
    let catalog_path = paths.resolve(&config.catalog_file);
    let errors = validate_catalog_file(&catalog_path)
        .with_context(|| format!("validate {}", catalog_path.display()))?;
    if errors.is_empty() {
        writeln!(out, "ok")?;
        return Ok(exit_codes::OK);
    }
    for err in errors {
        writeln!(out, "- {err}")?;
    }
    Ok(exit_codes::INVALID)
}

fn cmd_config<W: Write>(
    paths: &ShelfPaths,
    config: &ShelfConfig,
    write: bool,
    out: &mut W,
) -> Result<i32> {
    if write {
        write_config(&paths.config_path, config)?;
        writeln!(out, "wrote {}", paths.config_path.display())?;
    } else {
        write!(out, "{}", render_config(config)?)?;
    }
    Ok(exit_codes::OK)
}

fn report_error(err: &LoanError) -> i32 {
    eprintln!("{err}");
    exit_codes::for_error(err)
}

fn save_exit_code(status: &SaveStatus) -> i32 {
    match status {
        SaveStatus::Saved => exit_codes::OK,
        SaveStatus::Failed(err) => {
            eprintln!("Failed to save data: {err}");
            exit_codes::INVALID
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::clock::FixedClock;
    use crate::test_support::date;

    fn run_at(root: &Path, today: &str, command: Command) -> (i32, String) {
        let mut out = Vec::new();
        let code = run_with_clock(root, command, FixedClock::new(date(today)), &mut out)
            .expect("command");
        (code, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn issue_then_return_late_across_invocations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();

        let (code, out) = run_at(
            root,
            "2024-03-01",
            Command::Issue {
                id: 1,
                borrower: "X".to_string(),
            },
        );
        assert_eq!(code, exit_codes::OK);
        assert_eq!(out, "Book issued to X. Due date: 2024-03-08\n");

        let (code, out) = run_at(root, "2024-03-10", Command::Return { id: 1 });
        assert_eq!(code, exit_codes::OK);
        assert_eq!(out, "Book returned. Late by 2 days. Fine: ₹20\n");
    }

    #[test]
    fn loan_state_errors_map_to_exit_codes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        let (code, _) = run_at(root, "2024-03-01", Command::Return { id: 2 });
        assert_eq!(code, exit_codes::LOAN_STATE);
        let (code, _) = run_at(root, "2024-03-01", Command::Delete { id: 99 });
        assert_eq!(code, exit_codes::NOT_FOUND);
    }

    #[test]
    fn search_by_title_prints_matches() {
        let temp = tempfile::tempdir().expect("tempdir");
        let args = SearchArgs {
            id: None,
            title: Some("java".to_string()),
            author: None,
        };
        let (code, out) = run_at(temp.path(), "2024-03-01", Command::Search(args));
        assert_eq!(code, exit_codes::OK);
        assert_eq!(
            out,
            "ID: 2 | Title: Effective Java | Author: Joshua Bloch | Available: Yes\n"
        );
    }

    #[test]
    fn config_honours_custom_fine_rate() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        std::fs::write(
            root.join("shelf.toml"),
            "fine_per_day = 3\ncurrency = \"$\"\n",
        )
        .expect("write config");

        run_at(
            root,
            "2024-03-01",
            Command::Issue {
                id: 3,
                borrower: "Ada".to_string(),
            },
        );
        let (_, out) = run_at(root, "2024-03-12", Command::Return { id: 3 });
        assert_eq!(out, "Book returned. Late by 4 days. Fine: $12\n");

        let (code, out) = run_at(root, "2024-03-12", Command::Config { write: false });
        assert_eq!(code, exit_codes::OK);
        assert!(out.contains("fine_per_day = 3"));
    }

    #[test]
    fn validate_reports_ok_for_seeded_catalog() {
        let temp = tempfile::tempdir().expect("tempdir");
        run_at(temp.path(), "2024-03-01", Command::List);
        let (code, out) = run_at(temp.path(), "2024-03-01", Command::Validate);
        assert_eq!(code, exit_codes::OK);
        assert_eq!(out, "ok\n");
    }
}
