//! Plain-text export of the catalog, one rendered line per record.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::catalog::Catalog;
use crate::core::render::BookLine;

/// Write one line per record to `sink`. Returns the number of lines written.
pub fn write_lines<W: Write>(catalog: &Catalog, mut sink: W) -> Result<usize> {
    for book in catalog {
        writeln!(sink, "{}", BookLine(book)).context("write export line")?;
    }
    sink.flush().context("flush export")?;
    Ok(catalog.len())
}

/// Overwrite `path` with the rendered catalog.
pub fn export_to_path(catalog: &Catalog, path: &Path) -> Result<usize> {
    let mut buf = Vec::new();
    let count = write_lines(catalog, &mut buf)?;
    fs::write(path, buf).with_context(|| format!("write export {}", path.display()))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, catalog_of, date, on_loan};

    #[test]
    fn exports_one_line_per_record_in_catalog_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("books_export.txt");
        let catalog = catalog_of(vec![
            book(2, "B"),
            on_loan(book(1, "A"), "Ada", date("2024-03-04")),
        ]);

        let count = export_to_path(&catalog, &path).expect("export");
        assert_eq!(count, 2);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(
            contents,
            "ID: 2 | Title: B | Author: author of B | Available: Yes\n\
             ID: 1 | Title: A | Author: author of A | Available: No | Borrower: Ada | Due: 2024-03-04\n"
        );
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = export_to_path(&Catalog::seeded(), temp.path()).expect_err("directory");
        assert!(err.to_string().contains("write export"));
    }
}
