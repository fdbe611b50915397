//! In-memory catalog of book records.

use crate::core::types::{Book, BookId};

/// Titles and authors of the records a fresh catalog starts with.
pub const SEED_BOOKS: [(&str, &str); 3] = [
    ("Introduction to Algorithms", "Cormen"),
    ("Effective Java", "Joshua Bloch"),
    ("Clean Code", "Robert C. Martin"),
];

/// Ordered collection of book records.
///
/// Iteration follows insertion/load order. Lookup is a linear scan by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Catalog populated with [`SEED_BOOKS`], ids `1..=3`, all available.
    pub fn seeded() -> Self {
        let books = (1..)
            .zip(SEED_BOOKS)
            .map(|(id, (title, author))| Book::new(id, title, author))
            .collect();
        Self { books }
    }

    /// One greater than the largest id present, or 1 when empty.
    ///
    /// `None` once the largest id is `BookId::MAX`: ids are never reused.
    pub fn next_id(&self) -> Option<BookId> {
        match self.books.iter().map(|book| book.id).max() {
            None => Some(1),
            Some(max) => max.checked_add(1),
        }
    }

    /// Append a new available record and return its id, or `None` when no
    /// id is left to assign.
    pub fn insert(&mut self, title: &str, author: &str) -> Option<BookId> {
        let id = self.next_id()?;
        self.books.push(Book::new(id, title, author));
        Some(id)
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// Remove and return the record with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let pos = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(pos))
    }

    /// Restartable iterator over records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, catalog_of};

    #[test]
    fn next_id_starts_at_one_for_empty_catalog() {
        assert_eq!(Catalog::new().next_id(), Some(1));
    }

    #[test]
    fn next_id_is_max_plus_one_and_ignores_gaps() {
        let catalog = catalog_of(vec![book(4, "A"), book(2, "B")]);
        assert_eq!(catalog.next_id(), Some(5));
    }

    #[test]
    fn inserted_ids_are_strictly_increasing() {
        let mut catalog = Catalog::new();
        let ids: Vec<BookId> = (0..5)
            .map(|n| catalog.insert(&format!("title {n}"), "author").expect("id"))
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn deleting_the_max_id_lets_it_be_handed_out_again() {
        let mut catalog = Catalog::seeded();
        catalog.remove(3).expect("remove");
        assert_eq!(catalog.next_id(), Some(3));
    }

    #[test]
    fn ids_run_out_at_max_instead_of_repeating() {
        let mut catalog = catalog_of(vec![book(BookId::MAX, "Last")]);
        assert_eq!(catalog.next_id(), None);
        assert_eq!(catalog.insert("Another", "author"), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn seeded_catalog_has_three_available_books() {
        let catalog = Catalog::seeded();
        let ids: Vec<BookId> = catalog.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(catalog.iter().all(|b| b.available && b.due_date.is_none()));
        assert_eq!(catalog.get(3).map(|b| b.title.as_str()), Some("Clean Code"));
    }

    #[test]
    fn remove_preserves_order_of_remaining_records() {
        let mut catalog = catalog_of(vec![book(1, "A"), book(2, "B"), book(3, "C")]);
        assert!(catalog.remove(2).is_some());
        assert!(catalog.remove(2).is_none());
        let titles: Vec<&str> = catalog.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
