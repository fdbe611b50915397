//! Linear catalog search by id, title, or author.

use crate::core::catalog::Catalog;
use crate::core::types::{Book, BookId};
use crate::error::{LoanError, parse_book_id};

/// Which field a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Id,
    Title,
    Author,
}

impl SearchMode {
    /// Map the interactive menu choice (`1`, `2`, `3`) to a mode.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Id),
            "2" => Some(Self::Title),
            "3" => Some(Self::Author),
            _ => None,
        }
    }
}

/// A parsed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Id(BookId),
    /// Lowercased needle.
    Title(String),
    /// Lowercased needle.
    Author(String),
}

impl SearchQuery {
    /// Parse raw user input for `mode`. Id queries must be integers.
    pub fn parse(mode: SearchMode, raw: &str) -> Result<Self, LoanError> {
        let raw = raw.trim();
        Ok(match mode {
            SearchMode::Id => Self::Id(parse_book_id(raw)?),
            SearchMode::Title => Self::Title(raw.to_lowercase()),
            SearchMode::Author => Self::Author(raw.to_lowercase()),
        })
    }
}

/// Result of a search. An id lookup yields `Found`/`NotFound`; text searches
/// yield `Matches`/`NoMatches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Found(&'a Book),
    NotFound,
    Matches(Vec<&'a Book>),
    NoMatches,
}

impl<'a> SearchOutcome<'a> {
    /// Matched records in catalog order.
    pub fn books(&self) -> Vec<&'a Book> {
        match self {
            Self::Found(book) => vec![*book],
            Self::Matches(books) => books.clone(),
            Self::NotFound | Self::NoMatches => Vec::new(),
        }
    }
}

pub fn search<'a>(catalog: &'a Catalog, query: &SearchQuery) -> SearchOutcome<'a> {
    match query {
        SearchQuery::Id(id) => catalog
            .get(*id)
            .map_or(SearchOutcome::NotFound, SearchOutcome::Found),
        SearchQuery::Title(needle) => {
            text_matches(catalog, needle, |book| book.title.as_str())
        }
        SearchQuery::Author(needle) => {
            text_matches(catalog, needle, |book| book.author.as_str())
        }
    }
}

fn text_matches<'a>(
    catalog: &'a Catalog,
    needle: &str,
    field: impl Fn(&Book) -> &str,
) -> SearchOutcome<'a> {
    let matches: Vec<&Book> = catalog
        .iter()
        .filter(|book| field(book).to_lowercase().contains(needle))
        .collect();
    if matches.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(matches)
    }
}
