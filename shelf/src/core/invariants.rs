//! Semantic catalog invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::catalog::Catalog;

/// Check semantic invariants:
/// - ids are positive and unique
/// - `available` ⇔ empty borrower ⇔ no due date
pub fn validate_invariants(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for book in catalog {
        if book.id == 0 {
            errors.push(format!("book '{}': id must be > 0", book.title));
        }
        if !seen.insert(book.id) {
            errors.push(format!("duplicate id {}", book.id));
        }

        let has_borrower = !book.borrower.is_empty();
        let has_due = book.due_date.is_some();
        if book.available && (has_borrower || has_due) {
            errors.push(format!(
                "book {}: available but has borrower or due date",
                book.id
            ));
        }
        if !book.available && !(has_borrower && has_due) {
            errors.push(format!(
                "book {}: on loan but missing borrower or due date",
                book.id
            ));
        }
    }

    errors
}
