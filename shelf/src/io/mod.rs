//! I/O helpers: configuration, catalog persistence, export, and the clock.

pub mod catalog_store;
pub mod clock;
pub mod config;
pub mod export;
pub mod paths;
