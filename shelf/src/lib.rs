//! Single-user library catalog: books, loans, returns, and late fines.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (catalog, search, due dates and
//!   fines, rendering, invariants). No I/O.
//! - **[`io`]**: Side-effecting helpers (config, catalog file, export, clock).
//!
//! [`ops::Library`] ties the two together and persists after every mutation.
//! [`menu`] and [`cli`] are the interactive and one-shot front ends.

pub mod cli;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod ops;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
