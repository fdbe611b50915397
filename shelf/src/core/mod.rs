//! Deterministic, pure logic for the catalog and its loans.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and take "today" as an argument so that date arithmetic is
//! reproducible in tests.

pub mod catalog;
pub mod invariants;
pub mod loan;
pub mod render;
pub mod search;
pub mod types;
