//! Library Catalog
//!
//! A small catalog of library books: validated add, search, update and
//! delete operations over an in-memory catalog that is written to disk after
//! every change.

pub mod catalog_store;
pub mod config;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{Book, BookStatus, Catalog, CatalogError, CatalogStore};
pub use config::{AppConfig, PersistenceBackend};
