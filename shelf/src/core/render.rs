//! One-line rendering of a record, shared by listing and export.

use std::fmt;

use crate::core::types::Book;

/// Display adapter producing
/// `ID: <id> | Title: <t> | Author: <a> | Available: <Yes|No>`, with
/// ` | Borrower: <name> | Due: <YYYY-MM-DD>` appended while on loan.
pub struct BookLine<'a>(pub &'a Book);

impl fmt::Display for BookLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let book = self.0;
        write!(
            f,
            "ID: {} | Title: {} | Author: {} | Available: {}",
            book.id,
            book.title,
            book.author,
            if book.available { "Yes" } else { "No" }
        )?;
        if book.is_on_loan() {
            write!(f, " | Borrower: {}", book.borrower)?;
            if let Some(due) = book.due_date {
                write!(f, " | Due: {}", due.format("%Y-%m-%d"))?;
            }
        }
        Ok(())
    }
}
