//! Loan operations over a persisted catalog.
//!
//! [`Library`] owns the in-memory catalog and is its only mutator. Every
//! successful mutation is followed by a whole-catalog save; a failed save is
//! reported alongside the result but never undoes the in-memory change.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::catalog::Catalog;
use crate::core::loan::LoanPolicy;
use crate::core::search::{SearchMode, SearchOutcome, SearchQuery, search};
use crate::core::types::{Book, BookId, LoanReceipt, ReturnReceipt};
use crate::error::LoanError;
use crate::io::catalog_store::{CatalogStore, LoadSource};
use crate::io::clock::Clock;
use crate::io::config::ShelfConfig;
use crate::io::export::export_to_path;
use crate::io::paths::ShelfPaths;

/// Whether the save following a mutation reached disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

/// Result of a mutation plus the outcome of the save that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted<T> {
    pub value: T,
    pub save: SaveStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub count: usize,
}

/// The catalog together with its store, loan policy, and clock.
#[derive(Debug)]
pub struct Library<C: Clock> {
    catalog: Catalog,
    store: CatalogStore,
    policy: LoanPolicy,
    export_path: PathBuf,
    clock: C,
    load_source: LoadSource,
}

impl<C: Clock> Library<C> {
    /// Load (or seed) the catalog configured under `paths`. Never fails.
    pub fn open(paths: &ShelfPaths, config: ShelfConfig, clock: C) -> Self {
        let store = CatalogStore::new(paths.resolve(&config.catalog_file));
        let loaded = store.load();
        Self {
            catalog: loaded.catalog,
            store,
            policy: config.policy(),
            export_path: paths.resolve(&config.export_file),
            clock,
            load_source: loaded.source,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Destination used by [`Library::export`] when none is given.
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Persist the current catalog.
    pub fn save(&self) -> SaveStatus {
        match self.store.save(&self.catalog) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                let message = format!("{err:#}");
                warn!(path = %self.store.path().display(), error = %message, "failed to save catalog");
                SaveStatus::Failed(message)
            }
        }
    }

    fn persisted<T>(&self, value: T) -> Persisted<T> {
        Persisted {
            value,
            save: self.save(),
        }
    }

    /// Append a new available book and return its id.
    ///
    /// Fails with `InvalidInput` once the largest id in use is `BookId::MAX`.
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<Persisted<BookId>, LoanError> {
        let id = self
            .catalog
            .insert(title.trim(), author.trim())
            .ok_or_else(|| LoanError::InvalidInput("No ids left.".to_string()))?;
        info!(id, "book added");
        Ok(self.persisted(id))
    }

    /// Records in catalog order, or `None` when the catalog is empty.
    ///
    /// Call again to restart the iteration.
    pub fn list(&self) -> Option<std::slice::Iter<'_, Book>> {
        if self.catalog.is_empty() {
            None
        } else {
            Some(self.catalog.iter())
        }
    }

    pub fn search(&self, mode: SearchMode, raw: &str) -> Result<SearchOutcome<'_>, LoanError> {
        let query = SearchQuery::parse(mode, raw)?;
        debug!(?query, "searching catalog");
        Ok(search(&self.catalog, &query))
    }

    /// Check that `id` exists and is on the shelf.
    pub fn ensure_issuable(&self, id: BookId) -> Result<&Book, LoanError> {
        let book = self.catalog.get(id).ok_or(LoanError::NotFound(id))?;
        if book.is_on_loan() {
            return Err(LoanError::AlreadyOnLoan(id));
        }
        Ok(book)
    }

    /// Lend book `id` to `borrower`, due `loan_period_days` from today.
    pub fn issue(&mut self, id: BookId, borrower: &str) -> Result<Persisted<LoanReceipt>, LoanError> {
        self.ensure_issuable(id)?;
        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(LoanError::InvalidInput(
                "Borrower name must not be empty.".to_string(),
            ));
        }
        let today = self.clock.today();
        let due_date = self
            .policy
            .due_date(today)
            .ok_or_else(|| LoanError::InvalidInput("Due date out of range.".to_string()))?;

        let book = self.catalog.get_mut(id).ok_or(LoanError::NotFound(id))?;
        book.lend(borrower, due_date);
        info!(id, %due_date, "book issued");
        Ok(self.persisted(LoanReceipt {
            id,
            borrower: borrower.to_string(),
            due_date,
        }))
    }

    /// Take book `id` back, computing lateness against today.
    pub fn return_book(&mut self, id: BookId) -> Result<Persisted<ReturnReceipt>, LoanError> {
        let today = self.clock.today();
        let book = self.catalog.get_mut(id).ok_or(LoanError::NotFound(id))?;
        if !book.is_on_loan() {
            return Err(LoanError::NotOnLoan(id));
        }
        let late_days = book
            .shelve()
            .map_or(0, |due| LoanPolicy::late_days(due, today));
        let fine = self.policy.fine(late_days);
        info!(id, late_days, fine, "book returned");
        Ok(self.persisted(ReturnReceipt {
            id,
            late_days,
            fine,
        }))
    }

    /// Permanently remove book `id`.
    pub fn delete(&mut self, id: BookId) -> Result<Persisted<Book>, LoanError> {
        let removed = self.catalog.remove(id).ok_or(LoanError::NotFound(id))?;
        info!(id, "book deleted");
        Ok(self.persisted(removed))
    }

    /// Write the rendered catalog to `destination` (or the configured export file).
    pub fn export(&self, destination: Option<&Path>) -> Result<ExportReceipt, LoanError> {
        let path = destination.map_or_else(|| self.export_path.clone(), Path::to_path_buf);
        let count = export_to_path(&self.catalog, &path).map_err(LoanError::Io)?;
        info!(path = %path.display(), count, "catalog exported");
        Ok(ExportReceipt { path, count })
    }
}
