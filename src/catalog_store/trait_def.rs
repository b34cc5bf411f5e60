//! CatalogPersistence trait definition.
//!
//! A persistence backend stores a whole `Catalog` snapshot in a single file
//! and restores it. The store never talks to the filesystem directly.

use super::error::CatalogError;
use super::models::{Book, Catalog};
use super::validation::validate_book;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tempfile::NamedTempFile;

/// Trait for catalog persistence backends.
pub trait CatalogPersistence {
    /// Reads the full catalog.
    /// A missing file is a fresh catalog and yields an empty `Catalog`,
    /// anything unreadable is reported as `Io` or `Format`.
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Replaces the persisted catalog with `catalog`.
    fn persist(&self, catalog: &Catalog) -> Result<(), CatalogError>;

    /// Path of the file the catalog lives in.
    fn location(&self) -> &Path;
}

/// Creates an empty temporary file next to `target`, to be renamed over it
/// once fully written.
pub(crate) fn staging_file(target: &Path) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tempfile::Builder::new()
        .prefix(".catalog-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create a staging file in {}", dir.display()))
}

/// Renames a fully written staging file over `target`, keeping the
/// permissions `target` had.
pub(crate) fn replace_with_staging(staging: NamedTempFile, target: &Path) -> Result<()> {
    match std::fs::metadata(target) {
        Ok(metadata) => std::fs::set_permissions(staging.path(), metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", target.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to read metadata of {}", target.display())))
        }
    }
    staging
        .persist(target)
        .with_context(|| format!("Failed to replace {}", target.display()))?;
    Ok(())
}

/// Builds a catalog out of records read from disk, rejecting invalid and
/// duplicated records. Records are normalized the same way user input is.
pub(crate) fn catalog_from_rows<I>(rows: I) -> Result<Catalog, CatalogError>
where
    I: IntoIterator<Item = Book>,
{
    let mut catalog = Catalog::new();
    for (index, row) in rows.into_iter().enumerate() {
        let book = Book::new(
            &row.id,
            &row.title,
            &row.author,
            row.genre.as_deref(),
            row.status,
        );
        if let Err(err) = validate_book(&book) {
            return Err(CatalogError::Format(format!(
                "record #{} is invalid: {}",
                index + 1,
                err
            )));
        }
        if let Some(previous) = catalog.insert(book) {
            return Err(CatalogError::Format(format!(
                "record #{} repeats id '{}'",
                index + 1,
                previous.id
            )));
        }
    }
    Ok(catalog)
}
