mod file_config;

pub use file_config::FileConfig;

use crate::catalog_store::{
    CatalogPersistence, CatalogStore, JsonFileCatalogPersistence, SqliteCatalogPersistence,
};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Default catalog location for the SQLite backend, relative to the working directory.
pub const DEFAULT_SQLITE_CATALOG_PATH: &str = "library_catalog.db";

/// Default catalog location for the JSON backend, relative to the working directory.
pub const DEFAULT_JSON_CATALOG_PATH: &str = "library_catalog.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PersistenceBackend {
    #[default]
    Sqlite,
    Json,
}

impl PersistenceBackend {
    pub fn default_catalog_path(&self) -> PathBuf {
        match self {
            PersistenceBackend::Sqlite => PathBuf::from(DEFAULT_SQLITE_CATALOG_PATH),
            PersistenceBackend::Json => PathBuf::from(DEFAULT_JSON_CATALOG_PATH),
        }
    }

    /// Guesses the backend from the catalog file extension.
    fn infer_from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(PersistenceBackend::Json),
            "db" | "sqlite" | "sqlite3" => Some(PersistenceBackend::Sqlite),
            _ => None,
        }
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub backend: Option<PersistenceBackend>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub backend: PersistenceBackend,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let file_backend = match file.backend {
            Some(s) => match parse_backend(&s) {
                Some(backend) => Some(backend),
                None => bail!("Unknown backend in config file: {}", s),
            },
            None => None,
        };

        let explicit_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone());

        let backend = file_backend
            .or(cli.backend)
            .or_else(|| {
                explicit_path
                    .as_deref()
                    .and_then(PersistenceBackend::infer_from_path)
            })
            .unwrap_or_default();

        let catalog_path = explicit_path.unwrap_or_else(|| backend.default_catalog_path());

        if let Some(parent) = catalog_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Catalog directory does not exist: {:?}", parent);
            }
        }
        if catalog_path.is_dir() {
            bail!("Catalog path is a directory: {:?}", catalog_path);
        }

        Ok(Self {
            catalog_path,
            backend,
        })
    }

    pub fn persistence(&self) -> Box<dyn CatalogPersistence> {
        match self.backend {
            PersistenceBackend::Sqlite => {
                Box::new(SqliteCatalogPersistence::new(&self.catalog_path))
            }
            PersistenceBackend::Json => {
                Box::new(JsonFileCatalogPersistence::new(&self.catalog_path))
            }
        }
    }

    pub fn open_store(&self) -> CatalogStore {
        CatalogStore::open(self.persistence())
    }
}

/// Parses a backend string into PersistenceBackend.
/// Uses clap's ValueEnum trait for parsing.
fn parse_backend(s: &str) -> Option<PersistenceBackend> {
    PersistenceBackend::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend("sqlite"), Some(PersistenceBackend::Sqlite));
        assert_eq!(parse_backend("json"), Some(PersistenceBackend::Json));
        // Case insensitive
        assert_eq!(parse_backend("JSON"), Some(PersistenceBackend::Json));
        // Invalid
        assert!(parse_backend("csv").is_none());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();

        assert_eq!(config.backend, PersistenceBackend::Sqlite);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_SQLITE_CATALOG_PATH));
    }

    #[test]
    fn test_resolve_json_backend_default_path() {
        let cli = CliConfig {
            backend: Some(PersistenceBackend::Json),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_JSON_CATALOG_PATH));
    }

    #[test]
    fn test_resolve_infers_backend_from_extension() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(temp_dir.path().join("books.json")),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.backend, PersistenceBackend::Json);
    }

    #[test]
    fn test_resolve_explicit_backend_beats_extension() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(temp_dir.path().join("books.json")),
            backend: Some(PersistenceBackend::Sqlite),
        };
        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.backend, PersistenceBackend::Sqlite);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(PathBuf::from("/should/be/overridden.db")),
            backend: Some(PersistenceBackend::Sqlite),
        };
        let file_config = FileConfig {
            catalog_path: Some(temp_dir.path().join("books").to_string_lossy().to_string()),
            backend: Some("json".to_string()),
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.catalog_path, temp_dir.path().join("books"));
        assert_eq!(config.backend, PersistenceBackend::Json);
    }

    #[test]
    fn test_resolve_unknown_backend_error() {
        let file_config = FileConfig {
            backend: Some("csv".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&CliConfig::default(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("Unknown backend"));
    }

    #[test]
    fn test_resolve_nonexistent_directory_error() {
        let cli = CliConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/path/that/should/not/exist/catalog.db")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_directory_as_catalog_path_error() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("is a directory"));
    }

    #[test]
    fn test_open_store_uses_selected_backend() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(temp_dir.path().join("books.json")),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();

        let mut store = config.open_store();
        store
            .add("B1", "Dune", "Herbert", None, crate::catalog_store::BookStatus::Available)
            .unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("books.json")).unwrap();
        assert!(content.contains("\"format_version\": 1"));
    }
}
