//! Common test infrastructure
//!
//! Every test gets its own catalog file inside a temporary directory, so tests
//! can run in parallel and reopen the file to observe what was persisted.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestCatalog, BOOK_1_ID};
//! use library_catalog::PersistenceBackend;
//!
//! #[test]
//! fn test_find_seeded_book() {
//!     let catalog = TestCatalog::seeded(PersistenceBackend::Sqlite);
//!     assert!(catalog.open().find(BOOK_1_ID).is_some());
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::TestCatalog;
