//! Source of "today" for loan arithmetic.
//!
//! The [`Clock`] trait decouples loan operations from the wall clock. Tests use
//! [`FixedClock`] to issue and return on chosen calendar dates.

use std::cell::Cell;

use chrono::{Days, Local, NaiveDate};

pub trait Clock {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a date that tests can move forward.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward by `days` calendar days (saturating at chrono's max date).
    pub fn advance(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
