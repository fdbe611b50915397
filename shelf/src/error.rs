//! Failure kinds reported by catalog and loan operations.
//!
//! None of these are fatal: callers report the message and keep going.

use thiserror::Error;

use crate::core::types::BookId;

#[derive(Debug, Error)]
pub enum LoanError {
    /// Unparsable id, unknown search mode, or an empty borrower name.
    #[error("{0}")]
    InvalidInput(String),
    #[error("Book not found.")]
    NotFound(BookId),
    #[error("Book already issued.")]
    AlreadyOnLoan(BookId),
    #[error("Book is not issued.")]
    NotOnLoan(BookId),
    /// An export sink could not be written. Failed catalog saves are reported
    /// through `SaveStatus` instead.
    #[error("{0:#}")]
    Io(anyhow::Error),
}

impl LoanError {
    pub fn invalid_id() -> Self {
        Self::InvalidInput("Invalid ID.".to_string())
    }
}

/// Parse a user-supplied book id (surrounding whitespace is ignored).
pub fn parse_book_id(raw: &str) -> Result<BookId, LoanError> {
    raw.trim().parse().map_err(|_| LoanError::invalid_id())
}
