//! Interactive numbered-menu loop.
//!
//! Reads line-based answers from any `BufRead` and writes prompts and results
//! to any `Write`, so tests can drive a whole session from a string. Input is
//! trimmed. Invalid choices and ids are reported and the loop continues; end
//! of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::render::BookLine;
use crate::core::search::{SearchMode, SearchOutcome};
use crate::core::types::ReturnReceipt;
use crate::error::{LoanError, parse_book_id};
use crate::io::catalog_store::LoadSource;
use crate::io::clock::Clock;
use crate::ops::{Library, SaveStatus};

const MENU: &str = "\n--- Library Management System ---
1. Add Book
2. List Books
3. Search Book
4. Issue Book
5. Return Book
6. Delete Book
7. Export Book List
8. Exit
Choose an option: ";

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, C: Clock, R, W> {
    library: &'a mut Library<C>,
    currency: String,
    input: R,
    out: W,
}

impl<'a, C: Clock, R: BufRead, W: Write> Menu<'a, C, R, W> {
    pub fn new(library: &'a mut Library<C>, currency: &str, input: R, out: W) -> Self {
        Self {
            library,
            currency: currency.to_string(),
            input,
            out,
        }
    }

    /// Run until Exit or end of input. The catalog is saved on the way out.
    pub fn run(mut self) -> Result<()> {
        self.report_load()?;
        loop {
            write!(self.out, "{MENU}")?;
            self.out.flush().context("flush menu")?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.out)?;
                break;
            };
            debug!(choice = %choice, "menu option");
            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.list()?,
                "3" => self.search()?,
                "4" => self.issue()?,
                "5" => self.return_book()?,
                "6" => self.delete()?,
                "7" => self.export()?,
                "8" => break,
                _ => {
                    writeln!(self.out, "Invalid option. Try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        writeln!(self.out, "Exiting...")?;
        let status = self.library.save();
        self.report_save(&status)?;
        self.out.flush().context("flush output")?;
        Ok(())
    }

    fn report_load(&mut self) -> Result<()> {
        match self.library.load_source().clone() {
            LoadSource::Fresh { reason } => {
                writeln!(self.out, "Failed to load data. Starting fresh. ({reason})")?;
            }
            LoadSource::Seeded {
                save_error: Some(err),
            } => writeln!(self.out, "Failed to save data: {err}")?,
            LoadSource::Seeded { save_error: None } | LoadSource::Existing => {}
        }
        Ok(())
    }

    fn report_save(&mut self, status: &SaveStatus) -> Result<()> {
        if let SaveStatus::Failed(err) = status {
            writeln!(self.out, "Failed to save data: {err}")?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.out, "{question}")?;
        self.out.flush().context("flush prompt")?;
        self.read_line()
    }

    /// Prompt for an id. `Ok(Err(..))` carries an unparsable id.
    fn prompt_id(&mut self, question: &str) -> Result<Option<Result<u32, LoanError>>> {
        Ok(self.prompt(question)?.map(|raw| parse_book_id(&raw)))
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter book title:")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter author name:")? else {
            return Ok(Flow::Exit);
        };
        match self.library.add(&title, &author) {
            Ok(added) => {
                self.report_save(&added.save)?;
                writeln!(self.out, "Book added with ID {}", added.value)?;
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow> {
        let lines: Option<Vec<String>> = self
            .library
            .list()
            .map(|books| books.map(|book| BookLine(book).to_string()).collect());
        match lines {
            None => writeln!(self.out, "No books in library.")?,
            Some(lines) => {
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(choice) = self.prompt("Search by (1) ID, (2) Title, (3) Author?")? else {
            return Ok(Flow::Exit);
        };
        let Some(mode) = SearchMode::from_choice(&choice) else {
            writeln!(self.out, "Invalid choice.")?;
            return Ok(Flow::Continue);
        };
        let question = match mode {
            SearchMode::Id => "Enter book ID:",
            SearchMode::Title => "Enter title (partial allowed):",
            SearchMode::Author => "Enter author (partial allowed):",
        };
        let Some(raw) = self.prompt(question)? else {
            return Ok(Flow::Exit);
        };

        let library = &*self.library;
        let lines: Result<Vec<String>, String> = match library.search(mode, &raw) {
            Ok(SearchOutcome::NotFound) => Err("Book not found.".to_string()),
            Ok(SearchOutcome::NoMatches) => Err("No matching books.".to_string()),
            Ok(outcome) => Ok(outcome
                .books()
                .into_iter()
                .map(|book| BookLine(book).to_string())
                .collect()),
            Err(err) => Err(err.to_string()),
        };
        match lines {
            Ok(lines) => {
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
            }
            Err(message) => writeln!(self.out, "{message}")?,
        }
        Ok(Flow::Continue)
    }

    fn issue(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter book ID to issue:")? else {
            return Ok(Flow::Exit);
        };
        let id = match id.and_then(|id| self.library.ensure_issuable(id).map(|_| id)) {
            Ok(id) => id,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };
        let Some(borrower) = self.prompt("Enter borrower's name:")? else {
            return Ok(Flow::Exit);
        };
        match self.library.issue(id, &borrower) {
            Ok(issued) => {
                self.report_save(&issued.save)?;
                let receipt = issued.value;
                writeln!(
                    self.out,
                    "Book issued to {}. Due date: {}",
                    receipt.borrower,
                    receipt.due_date.format("%Y-%m-%d")
                )?;
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn return_book(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter book ID to return:")? else {
            return Ok(Flow::Exit);
        };
        match id.and_then(|id| self.library.return_book(id)) {
            Ok(returned) => {
                self.report_save(&returned.save)?;
                let line = return_message(&returned.value, &self.currency);
                writeln!(self.out, "{line}")?;
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter book ID to delete:")? else {
            return Ok(Flow::Exit);
        };
        match id.and_then(|id| self.library.delete(id)) {
            Ok(deleted) => {
                self.report_save(&deleted.save)?;
                writeln!(self.out, "Book deleted.")?;
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> Result<Flow> {
        let path = self.library.export_path().to_path_buf();
        writeln!(self.out, "Exporting book list to {} ...", path.display())?;
        match self.library.export(None) {
            Ok(_) => writeln!(self.out, "Export completed.")?,
            Err(err) => writeln!(self.out, "Failed to export: {err}")?,
        }
        Ok(Flow::Continue)
    }
}

/// User-facing summary of a return.
pub fn return_message(receipt: &ReturnReceipt, currency: &str) -> String {
    if receipt.is_late() {
        format!(
            "Book returned. Late by {} days. Fine: {}{}",
            receipt.late_days, currency, receipt.fine
        )
    } else {
        "Book returned on time. Thank you!".to_string()
    }
}
