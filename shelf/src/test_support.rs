//! Test-only helpers for constructing catalogs and libraries.

use std::path::Path;

use chrono::NaiveDate;

use crate::core::catalog::Catalog;
use crate::core::types::{Book, BookId};
use crate::io::catalog_store::CatalogStore;
use crate::io::clock::FixedClock;
use crate::io::config::ShelfConfig;
use crate::io::paths::ShelfPaths;
use crate::ops::Library;

/// Create a deterministic available book; the author is derived from the title.
pub fn book(id: BookId, title: &str) -> Book {
    Book::new(id, title, format!("author of {title}"))
}

/// Put `book` on loan to `borrower` until `due`.
pub fn on_loan(mut book: Book, borrower: &str, due: NaiveDate) -> Book {
    book.available = false;
    book.borrower = borrower.to_string();
    book.due_date = Some(due);
    book
}

pub fn catalog_of(books: Vec<Book>) -> Catalog {
    Catalog::from_books(books)
}

/// Parse a `YYYY-MM-DD` date literal.
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

/// Open a library rooted at `root` with default config and a fixed clock.
pub fn library_in(root: &Path, today: &str) -> Library<FixedClock> {
    let paths = ShelfPaths::new(root);
    Library::open(&paths, ShelfConfig::default(), FixedClock::new(date(today)))
}

/// Open a library rooted at `root` over an explicit catalog (persisted immediately).
pub fn library_with(root: &Path, today: &str, catalog: Catalog) -> Library<FixedClock> {
    let paths = ShelfPaths::new(root);
    let store = CatalogStore::new(paths.resolve(&ShelfConfig::default().catalog_file));
    store.save(&catalog).expect("seed catalog file");
    Library::open(&paths, ShelfConfig::default(), FixedClock::new(date(today)))
}
