use super::constants::*;
use library_catalog::config::{AppConfig, CliConfig};
use library_catalog::{BookStatus, CatalogStore, PersistenceBackend};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A catalog file living in its own temporary directory.
pub struct TestCatalog {
    pub config: AppConfig,
    // Held for its Drop, removes the directory.
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestCatalog {
    /// An empty catalog location; the file itself does not exist yet.
    pub fn empty(backend: PersistenceBackend) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file_name = match backend {
            PersistenceBackend::Sqlite => "catalog.db",
            PersistenceBackend::Json => "catalog.json",
        };
        let cli = CliConfig {
            catalog_path: Some(dir.path().join(file_name)),
            backend: Some(backend),
        };
        let config = AppConfig::resolve(&cli, None).expect("Failed to resolve config");
        TestCatalog { config, _dir: dir }
    }

    /// A catalog already holding the three seed books.
    pub fn seeded(backend: PersistenceBackend) -> Self {
        let catalog = Self::empty(backend);
        let mut store = catalog.open();
        store
            .add(
                BOOK_1_ID,
                BOOK_1_TITLE,
                BOOK_1_AUTHOR,
                Some(BOOK_1_GENRE),
                BookStatus::Available,
            )
            .expect("Failed to seed book 1");
        store
            .add(
                BOOK_2_ID,
                BOOK_2_TITLE,
                BOOK_2_AUTHOR,
                None,
                BookStatus::CheckedOut,
            )
            .expect("Failed to seed book 2");
        store
            .add(
                BOOK_3_ID,
                BOOK_3_TITLE,
                BOOK_3_AUTHOR,
                Some(BOOK_3_GENRE),
                BookStatus::Available,
            )
            .expect("Failed to seed book 3");
        catalog
    }

    /// Opens a fresh store over the catalog file, as a new process would.
    pub fn open(&self) -> CatalogStore {
        self.config.open_store()
    }

    pub fn path(&self) -> &Path {
        &self.config.catalog_path
    }

    pub fn dir(&self) -> PathBuf {
        self._dir.path().to_path_buf()
    }
}
