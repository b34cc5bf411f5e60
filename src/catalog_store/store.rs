//! The catalog store: an in-memory `Catalog` kept in sync with a
//! persistence backend.
//!
//! Every successful mutation is followed by a full persist. When persisting
//! fails the mutation is undone, so the in-memory catalog always matches the
//! last snapshot that was written.

use super::error::CatalogError;
use super::models::{normalize_genre, Book, BookStatus, Catalog};
use super::trait_def::CatalogPersistence;
use super::validation::{validate_mutable_fields, validate_new_book};
use std::path::Path;
use tracing::{debug, warn};

/// Loads the catalog through `persistence`, falling back to an empty catalog
/// on any read or format error.
pub fn load_catalog(persistence: &dyn CatalogPersistence) -> Catalog {
    load_or_fallback(persistence).0
}

/// Like [`load_catalog`], also telling whether the fallback was taken.
fn load_or_fallback(persistence: &dyn CatalogPersistence) -> (Catalog, bool) {
    match persistence.load() {
        Ok(catalog) => (catalog, false),
        Err(err) => {
            warn!(
                "Could not load catalog from {}, starting empty: {}",
                persistence.location().display(),
                err
            );
            (Catalog::new(), true)
        }
    }
}

pub struct CatalogStore {
    catalog: Catalog,
    persistence: Box<dyn CatalogPersistence>,
    loaded_from_fallback: bool,
}

impl CatalogStore {
    /// Opens the store, loading whatever `persistence` holds.
    pub fn open(persistence: Box<dyn CatalogPersistence>) -> Self {
        let (catalog, loaded_from_fallback) = load_or_fallback(persistence.as_ref());
        CatalogStore {
            catalog,
            persistence,
            loaded_from_fallback,
        }
    }

    /// True when the persisted file could not be read and the store started
    /// empty. The file is left untouched until the first successful mutation.
    pub fn loaded_from_fallback(&self) -> bool {
        self.loaded_from_fallback
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        genre: Option<&str>,
        status: BookStatus,
    ) -> Result<(), CatalogError> {
        let book = Book::new(id, title, author, genre, status);
        validate_new_book(&self.catalog, &book)?;

        let id = book.id.clone();
        self.catalog.insert(book);
        if let Err(err) = self.commit() {
            self.catalog.remove(&id);
            return Err(err);
        }
        debug!("Added book {}", id);
        Ok(())
    }

    /// Overwrites every mutable field of the book `id`.
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        genre: Option<&str>,
        status: BookStatus,
    ) -> Result<(), CatalogError> {
        let id = id.trim();
        if !self.catalog.contains(id) {
            return Err(CatalogError::not_found(id));
        }
        let (title, author) = (title.trim(), author.trim());
        validate_mutable_fields(title, author)?;

        let book = match self.catalog.get_mut(id) {
            Some(book) => book,
            None => return Err(CatalogError::not_found(id)),
        };
        let previous = book.clone();
        book.title = title.to_string();
        book.author = author.to_string();
        book.genre = normalize_genre(genre);
        book.status = status;

        if let Err(err) = self.commit() {
            self.catalog.insert(previous);
            return Err(err);
        }
        debug!("Updated book {}", id);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), CatalogError> {
        let id = id.trim();
        let removed = self
            .catalog
            .remove(id)
            .ok_or_else(|| CatalogError::not_found(id))?;

        if let Err(err) = self.commit() {
            self.catalog.insert(removed);
            return Err(err);
        }
        debug!("Deleted book {}", id);
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Finds a book whose id or title matches `key`, ignoring case.
    ///
    /// When several books match, an exact id match wins, then a
    /// case-insensitive id match, then the title match with the lowest id.
    pub fn find(&self, key: &str) -> Option<&Book> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        if let Some(book) = self.catalog.get(key) {
            return Some(book);
        }

        let key = key.to_lowercase();
        self.catalog
            .iter()
            .find(|book| book.id.to_lowercase() == key)
            .or_else(|| {
                self.catalog
                    .iter()
                    .find(|book| book.title.to_lowercase() == key)
            })
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.catalog.get(id.trim())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.catalog.contains(id.trim())
    }

    /// All books, in identifier order.
    pub fn snapshot(&self) -> Vec<Book> {
        self.catalog.iter().cloned().collect()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the whole catalog, replacing the previous snapshot.
    pub fn persist(&self) -> Result<(), CatalogError> {
        self.persistence.persist(&self.catalog).inspect_err(|err| {
            warn!(
                "Failed to persist catalog to {}: {}",
                self.location().display(),
                err
            )
        })
    }

    /// Persists after a mutation. A successful write replaces whatever
    /// unreadable file the store may have started from.
    fn commit(&mut self) -> Result<(), CatalogError> {
        self.persist()?;
        self.loaded_from_fallback = false;
        Ok(())
    }

    /// Discards the in-memory catalog and loads it again from disk.
    pub fn reload(&mut self) {
        let (catalog, loaded_from_fallback) = load_or_fallback(self.persistence.as_ref());
        self.catalog = catalog;
        self.loaded_from_fallback = loaded_from_fallback;
    }

    pub fn location(&self) -> &Path {
        self.persistence.location()
    }
}
