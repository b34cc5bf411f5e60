//! SQLite-backed catalog persistence.
//!
//! Each load or persist opens its own connection and closes it before
//! returning. Persisting writes a brand new database into a staging file and
//! renames it over the previous one.

use super::error::CatalogError;
use super::models::{Book, BookStatus, Catalog};
use super::schema::{latest_schema, schema_for_version, TABLE_BOOKS};
use super::trait_def::{
    catalog_from_rows, replace_with_staging, staging_file, CatalogPersistence,
};
use crate::sqlite_persistence::read_schema_version;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct SqliteCatalogPersistence {
    db_path: PathBuf,
}

impl SqliteCatalogPersistence {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        SqliteCatalogPersistence {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    fn read_rows(&self) -> Result<Vec<Book>> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database")?;

        let schema = match read_schema_version(&conn)? {
            Some(version) => schema_for_version(version)
                .ok_or_else(|| anyhow!("Unsupported catalog schema version {}", version))?,
            None => bail!("{} is not a catalog database", self.db_path.display()),
        };
        schema.validate(&conn)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, author, genre, status FROM {} ORDER BY id",
            TABLE_BOOKS
        ))?;
        let raw_rows: Vec<(String, String, String, Option<String>, String)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<Result<_, _>>()?;

        raw_rows
            .into_iter()
            .map(|(id, title, author, genre, status)| {
                let status = BookStatus::from_db_str(&status)
                    .ok_or_else(|| anyhow!("Book {} has unknown status '{}'", id, status))?;
                Ok(Book {
                    id,
                    title,
                    author,
                    genre,
                    status,
                })
            })
            .collect()
    }

    fn write_snapshot(&self, catalog: &Catalog) -> Result<()> {
        let staging = staging_file(&self.db_path)?;

        let mut conn = Connection::open(staging.path())
            .context("Failed to open staging catalog database")?;
        latest_schema().create(&conn)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (id, title, author, genre, status) VALUES (?1, ?2, ?3, ?4, ?5)",
                TABLE_BOOKS
            ))?;
            for book in catalog.iter() {
                stmt.execute(params![
                    book.id,
                    book.title,
                    book.author,
                    book.genre,
                    book.status.to_db_str()
                ])
                .with_context(|| format!("Failed to write book {}", book.id))?;
            }
        }
        tx.commit()?;
        conn.close().map_err(|(_, err)| err)?;

        replace_with_staging(staging, &self.db_path)
    }
}

impl CatalogPersistence for SqliteCatalogPersistence {
    fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.db_path.exists() {
            info!(
                "No catalog database at {}, starting empty",
                self.db_path.display()
            );
            return Ok(Catalog::new());
        }

        let rows = self
            .read_rows()
            .map_err(|err| CatalogError::Format(format!("{:#}", err)))?;
        let catalog = catalog_from_rows(rows)?;
        info!(
            "Loaded {} books from {}",
            catalog.len(),
            self.db_path.display()
        );
        Ok(catalog)
    }

    fn persist(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        self.write_snapshot(catalog).map_err(CatalogError::Io)?;
        debug!(
            "Persisted {} books to {}",
            catalog.len(),
            self.db_path.display()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.db_path
    }
}
