//! Shared types for the catalog core.
//!
//! `Book` is also the persisted record shape: field names here are part of the
//! on-disk catalog format and must stay in sync with
//! `schemas/catalog/v1.schema.json`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a book record. Positive, unique within a catalog.
pub type BookId = u32;

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// `true` while on the shelf, `false` while on loan.
    pub available: bool,
    /// Empty unless the book is on loan.
    pub borrower: String,
    /// Present only while the book is on loan.
    pub due_date: Option<NaiveDate>,
}

impl Book {
    /// Create an available book with no loan state.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            available: true,
            borrower: String::new(),
            due_date: None,
        }
    }

    pub fn is_on_loan(&self) -> bool {
        !self.available
    }

    /// Put the book on loan to `borrower` until `due_date`.
    pub(crate) fn lend(&mut self, borrower: &str, due_date: NaiveDate) {
        self.available = false;
        self.borrower = borrower.to_string();
        self.due_date = Some(due_date);
    }

    /// Clear all loan state, returning the due date that was set (if any).
    pub(crate) fn shelve(&mut self) -> Option<NaiveDate> {
        self.available = true;
        self.borrower.clear();
        self.due_date.take()
    }
}

/// Outcome of a successful issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReceipt {
    pub id: BookId,
    pub borrower: String,
    pub due_date: NaiveDate,
}

/// Outcome of a successful return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub id: BookId,
    /// Whole calendar days past the due date (0 when on time).
    pub late_days: u64,
    /// `late_days * fine_per_day`.
    pub fine: u64,
}

impl ReturnReceipt {
    pub fn is_late(&self) -> bool {
        self.late_days > 0
    }
}
