//! Catalog models.
//!
//! A `Book` is one catalog entry, a `Catalog` is the full set of books keyed
//! by identifier.

use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Enumerations
// =============================================================================

/// Lending status of a book
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[default]
    Available,
    CheckedOut,
}

impl BookStatus {
    /// Convert from database string representation
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(BookStatus::Available),
            "checked_out" => Some(BookStatus::CheckedOut),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }

    /// Human readable label, as shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::CheckedOut => "Checked Out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "available" => Ok(BookStatus::Available),
            "checkedout" => Ok(BookStatus::CheckedOut),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Core Entities
// =============================================================================

/// A book of the catalog.
///
/// Fields are public for reading, construction should go through
/// [`Book::new`] so that inputs get normalized.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub status: BookStatus,
}

impl Book {
    /// Builds a book trimming every text field. A blank genre becomes `None`.
    /// No validation happens here, see [`super::validation::validate_book`].
    pub fn new(
        id: impl AsRef<str>,
        title: impl AsRef<str>,
        author: impl AsRef<str>,
        genre: Option<&str>,
        status: BookStatus,
    ) -> Self {
        Book {
            id: id.as_ref().trim().to_string(),
            title: title.as_ref().trim().to_string(),
            author: author.as_ref().trim().to_string(),
            genre: normalize_genre(genre),
            status,
        }
    }
}

pub(crate) fn normalize_genre(genre: Option<&str>) -> Option<String> {
    genre
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
}

/// The full set of books, keyed by identifier.
///
/// Backed by a `BTreeMap` so iteration follows identifier order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Catalog {
    books: BTreeMap<String, Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Inserts a book, returning the previous book stored under the same id.
    pub(crate) fn insert(&mut self, book: Book) -> Option<Book> {
        self.books.insert(book.id.clone(), book)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.get_mut(id)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Book> {
        self.books.remove(id)
    }
}

impl FromIterator<Book> for Catalog {
    fn from_iter<T: IntoIterator<Item = Book>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for book in iter {
            catalog.insert(book);
        }
        catalog
    }
}
