//! Due-date and fine arithmetic.
//!
//! All arithmetic is on calendar dates: issuing at any time on day `D` yields
//! a due date of `D + loan_period_days`, and a return on the due date itself is
//! not late.

use chrono::{Days, NaiveDate};

/// Loan period and fine rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    pub loan_period_days: u32,
    pub fine_per_day: u64,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 7,
            fine_per_day: 10,
        }
    }
}

impl LoanPolicy {
    /// Due date for a loan issued on `issued_on`.
    ///
    /// Returns `None` only if the result falls outside chrono's date range.
    pub fn due_date(&self, issued_on: NaiveDate) -> Option<NaiveDate> {
        issued_on.checked_add_days(Days::new(u64::from(self.loan_period_days)))
    }

    /// Whole days `returned_on` is past `due_date`; 0 when on or before it.
    pub fn late_days(due_date: NaiveDate, returned_on: NaiveDate) -> u64 {
        let days = (returned_on - due_date).num_days();
        u64::try_from(days).unwrap_or(0)
    }

    pub fn fine(&self, late_days: u64) -> u64 {
        late_days.saturating_mul(self.fine_per_day)
    }
}
