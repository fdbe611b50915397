//! `shelf validate`: schema and invariant checks on the catalog file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::core::catalog::Catalog;
use crate::core::invariants::validate_invariants;
use crate::core::types::Book;
use crate::io::catalog_store::{CatalogStore, schema_errors};

#[derive(Deserialize)]
struct BooksOnly {
    books: Vec<Book>,
}

/// Validate the catalog file at `path`.
///
/// Returns the list of violations (empty when valid). A missing or unparsable
/// file is an error rather than a violation.
pub fn validate_catalog_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("catalog {} does not exist", path.display());
    }
    let store = CatalogStore::new(path);
    let value = store.read_value()?;

    let errors = schema_errors(&value)?;
    if !errors.is_empty() {
        return Ok(errors
            .into_iter()
            .map(|err| format!("schema: {err}"))
            .collect());
    }

    let doc: BooksOnly = serde_json::from_value(value)
        .with_context(|| format!("deserialize catalog {}", path.display()))?;
    Ok(validate_invariants(&Catalog::from_books(doc.books)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, catalog_of, date, on_loan};

    #[test]
    fn valid_catalog_has_no_violations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("library.json");
        CatalogStore::new(&path)
            .save(&Catalog::seeded())
            .expect("save");
        assert!(validate_catalog_file(&path).expect("validate").is_empty());
    }

    #[test]
    fn reports_invariant_violations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("library.json");
        let mut returned_badly = on_loan(book(2, "B"), "Ada", date("2024-03-04"));
        returned_badly.available = true;
        CatalogStore::new(&path)
            .save(&catalog_of(vec![book(2, "A"), returned_badly]))
            .expect("save");

        let errors = validate_catalog_file(&path).expect("validate");
        assert!(errors.iter().any(|err| err.contains("duplicate id 2")));
        assert!(errors.iter().any(|err| err.contains("available but has borrower")));
    }

    #[test]
    fn reports_schema_violations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("library.json");
        std::fs::write(&path, "{\"version\": 2, \"books\": []}").expect("write");
        let errors = validate_catalog_file(&path).expect("validate");
        assert!(!errors.is_empty());
        assert!(errors[0].starts_with("schema: "));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = validate_catalog_file(&temp.path().join("nope.json")).expect_err("missing");
        assert!(err.to_string().contains("does not exist"));
    }
}
