//! JSON file catalog persistence.
//!
//! The file holds a single document with a format version and one object per
//! book:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "books": [
//!     { "id": "B1", "title": "Dune", "author": "Frank Herbert", "genre": "SciFi", "status": "available" }
//!   ]
//! }
//! ```

use super::error::CatalogError;
use super::models::{Book, Catalog};
use super::trait_def::{
    catalog_from_rows, replace_with_staging, staging_file, CatalogPersistence,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const JSON_FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct DumpHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct Dump {
    books: Vec<Book>,
}

#[derive(Serialize)]
struct DumpRef<'a> {
    format_version: u32,
    books: Vec<&'a Book>,
}

pub struct JsonFileCatalogPersistence {
    file_path: PathBuf,
}

impl JsonFileCatalogPersistence {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        JsonFileCatalogPersistence {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    fn parse(content: &str) -> Result<Vec<Book>, CatalogError> {
        let header: DumpHeader = serde_json::from_str(content)
            .map_err(|err| CatalogError::Format(format!("unreadable catalog file: {}", err)))?;
        if header.format_version != JSON_FORMAT_VERSION {
            return Err(CatalogError::Format(format!(
                "unsupported catalog format version {}",
                header.format_version
            )));
        }
        let dump: Dump = serde_json::from_str(content)
            .map_err(|err| CatalogError::Format(format!("unreadable catalog file: {}", err)))?;
        Ok(dump.books)
    }

    fn write_snapshot(&self, catalog: &Catalog) -> Result<()> {
        let dump = DumpRef {
            format_version: JSON_FORMAT_VERSION,
            books: catalog.iter().collect(),
        };
        let json_string = serde_json::to_string_pretty(&dump)?;

        let mut staging = staging_file(&self.file_path)?;
        staging.write_all(json_string.as_bytes())?;
        staging.as_file().sync_all()?;
        replace_with_staging(staging, &self.file_path)
    }
}

impl CatalogPersistence for JsonFileCatalogPersistence {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let mut file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "No catalog file at {}, starting empty",
                    self.file_path.display()
                );
                return Ok(Catalog::new());
            }
            Err(err) => {
                return Err(CatalogError::Io(anyhow::Error::new(err).context(format!(
                    "Failed to open {}",
                    self.file_path.display()
                ))))
            }
        };

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(|err| {
            CatalogError::Format(format!("catalog file is not valid UTF-8 text: {}", err))
        })?;

        let catalog = catalog_from_rows(Self::parse(&content)?)?;
        info!(
            "Loaded {} books from {}",
            catalog.len(),
            self.file_path.display()
        );
        Ok(catalog)
    }

    fn persist(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        self.write_snapshot(catalog).map_err(CatalogError::Io)?;
        debug!(
            "Persisted {} books to {}",
            catalog.len(),
            self.file_path.display()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::models::BookStatus;
    use tempfile::TempDir;

    fn create_tmp_persistence() -> (JsonFileCatalogPersistence, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonFileCatalogPersistence::new(temp_dir.path().join("catalog.json"));
        (persistence, temp_dir)
    }

    fn sample_catalog() -> Catalog {
        vec![
            Book::new("B1", "Dune", "Frank Herbert", Some("SciFi"), BookStatus::Available),
            Book::new("B2", "Emma", "Jane Austen", None, BookStatus::CheckedOut),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        let catalog = sample_catalog();

        persistence.persist(&catalog).unwrap();
        assert_eq!(persistence.load().unwrap(), catalog);

        persistence.persist(&Catalog::new()).unwrap();
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_persisted_document_layout() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        persistence.persist(&sample_catalog()).unwrap();

        let content = std::fs::read_to_string(persistence.location()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["format_version"], 1);
        assert_eq!(value["books"].as_array().unwrap().len(), 2);
        assert_eq!(value["books"][0]["id"], "B1");
        assert_eq!(value["books"][1]["status"], "checked_out");
        assert!(value["books"][1]["genre"].is_null());
    }

    #[test]
    fn test_load_accepts_missing_genre_key() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        std::fs::write(
            persistence.location(),
            r#"{"format_version": 1, "books": [{"id": "B1", "title": "Dune", "author": "Herbert", "status": "available"}]}"#,
        )
        .unwrap();

        let catalog = persistence.load().unwrap();
        assert_eq!(catalog.get("B1").unwrap().genre, None);
    }

    #[test]
    fn test_load_malformed_json_is_format_error() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        std::fs::write(persistence.location(), "{ not json").unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, CatalogError::Format(_)));
    }

    #[test]
    fn test_load_unknown_version_is_format_error() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        std::fs::write(persistence.location(), r#"{"format_version": 7, "books": []}"#).unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, CatalogError::Format(msg) if msg.contains("version 7")));
    }

    #[test]
    fn test_load_unknown_status_is_format_error() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        std::fs::write(
            persistence.location(),
            r#"{"format_version": 1, "books": [{"id": "B1", "title": "Dune", "author": "Herbert", "genre": null, "status": "lost"}]}"#,
        )
        .unwrap();

        assert!(matches!(persistence.load(), Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_load_duplicated_ids_is_format_error() {
        let (persistence, _temp_dir) = create_tmp_persistence();
        std::fs::write(
            persistence.location(),
            r#"{"format_version": 1, "books": [
                {"id": "B1", "title": "Dune", "author": "Herbert", "status": "available"},
                {"id": "B1", "title": "Emma", "author": "Austen", "status": "available"}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(persistence.load(), Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_persist_into_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let persistence =
            JsonFileCatalogPersistence::new(temp_dir.path().join("missing").join("catalog.json"));

        let err = persistence.persist(&sample_catalog()).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
