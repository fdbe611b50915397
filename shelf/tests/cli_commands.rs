//! CLI tests for one-shot shelf commands.
//!
//! Spawns the shelf binary against a temp data directory and verifies exit
//! codes, stdout, and what ends up on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use shelf::core::catalog::Catalog;
use shelf::exit_codes;
use shelf::io::catalog_store::CatalogStore;
use shelf::test_support::{book, catalog_of};

fn shelf(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shelf"))
        .env_remove("SHELF_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(root)
        .args(args)
        .output()
        .expect("run shelf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn first_run_seeds_three_books_and_persists_them() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = shelf(temp.path(), &["list"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let listing = stdout(&output);
    assert_eq!(listing.lines().count(), 3);
    assert!(listing.starts_with("ID: 1 | Title: Introduction to Algorithms | Author: Cormen"));

    let stored = CatalogStore::new(temp.path().join("library.json"))
        .read()
        .expect("catalog persisted");
    assert_eq!(stored, Catalog::seeded());
}

#[test]
fn add_assigns_next_id_after_gaps() {
    let temp = tempfile::tempdir().expect("tempdir");
    CatalogStore::new(temp.path().join("library.json"))
        .save(&catalog_of(vec![book(1, "A"), book(5, "B")]))
        .expect("seed");

    let output = shelf(temp.path(), &["add", "Refactoring", "Martin Fowler"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "Book added with ID 6\n");
}

#[test]
fn issue_twice_exits_with_loan_state_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let first = shelf(temp.path(), &["issue", "2", "Ada"]);
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    assert!(stdout(&first).starts_with("Book issued to Ada. Due date: "));

    let second = shelf(temp.path(), &["issue", "2", "Bob"]);
    assert_eq!(second.status.code(), Some(exit_codes::LOAN_STATE));
    assert!(String::from_utf8_lossy(&second.stderr).contains("Book already issued."));

    let listing = stdout(&shelf(temp.path(), &["search", "--id", "2"]));
    assert!(listing.contains("Borrower: Ada"));
}

#[test]
fn return_and_delete_of_unknown_id_leave_catalog_unchanged() {
    let temp = tempfile::tempdir().expect("tempdir");
    shelf(temp.path(), &["list"]);
    let path = temp.path().join("library.json");
    let before = fs::read_to_string(&path).expect("read");

    let returned = shelf(temp.path(), &["return", "42"]);
    assert_eq!(returned.status.code(), Some(exit_codes::NOT_FOUND));
    let deleted = shelf(temp.path(), &["delete", "42"]);
    assert_eq!(deleted.status.code(), Some(exit_codes::NOT_FOUND));

    assert_eq!(fs::read_to_string(&path).expect("read"), before);
}

#[test]
fn export_writes_default_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = shelf(temp.path(), &["export"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let exported = fs::read_to_string(temp.path().join("books_export.txt")).expect("export");
    assert_eq!(
        exported.lines().last(),
        Some("ID: 3 | Title: Clean Code | Author: Robert C. Martin | Available: Yes")
    );
}

#[test]
fn corrupt_catalog_starts_empty_and_validate_flags_it() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("library.json"), "{\"books\": 7}").expect("write");

    let validate = shelf(temp.path(), &["validate"]);
    assert_eq!(validate.status.code(), Some(exit_codes::INVALID));
    assert!(stdout(&validate).contains("schema:"));

    let listing = shelf(temp.path(), &["list"]);
    assert_eq!(listing.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&listing), "No books in library.\n");
}

#[test]
fn read_only_commands_leave_unreadable_catalog_untouched() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("library.json");
    let broken = "{\"version\": 1, \"books\": [\"not a book\"]}";
    fs::write(&path, broken).expect("write");

    let commands: [&[&str]; 3] = [&["list"], &["search", "--title", "x"], &["export"]];
    for args in commands {
        shelf(temp.path(), args);
    }

    assert_eq!(fs::read_to_string(&path).expect("read"), broken);
}

#[test]
fn add_fails_when_ids_are_exhausted() {
    let temp = tempfile::tempdir().expect("tempdir");
    CatalogStore::new(temp.path().join("library.json"))
        .save(&catalog_of(vec![book(u32::MAX, "Last")]))
        .expect("seed");

    let output = shelf(temp.path(), &["add", "One more", "Author"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No ids left."));
    let stored = CatalogStore::new(temp.path().join("library.json"))
        .read()
        .expect("catalog still valid");
    assert_eq!(stored.len(), 1);
}
