//! Stable exit codes for shelf CLI commands.

use crate::error::LoanError;

/// Command succeeded.
pub const OK: i32 = 0;
/// Bad invocation, invalid input, I/O failure, or an invalid catalog file.
pub const INVALID: i32 = 1;
/// No book has the requested id (or a search found nothing).
pub const NOT_FOUND: i32 = 2;
/// The book is already on loan, or is not on loan.
pub const LOAN_STATE: i32 = 3;

/// Exit code for a failed loan operation.
pub fn for_error(err: &LoanError) -> i32 {
    match err {
        LoanError::NotFound(_) => NOT_FOUND,
        LoanError::AlreadyOnLoan(_) | LoanError::NotOnLoan(_) => LOAN_STATE,
        LoanError::InvalidInput(_) | LoanError::Io(_) => INVALID,
    }
}
