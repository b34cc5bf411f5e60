use super::validation::ValidationError;
use thiserror::Error;

/// Errors surfaced by the catalog store and its persistence backends.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid or duplicate input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Book not found: {id}")]
    NotFound { id: String },

    #[error("Could not persist the catalog: {0:#}")]
    Io(#[source] anyhow::Error),

    #[error("Malformed catalog data: {0}")]
    Format(String),
}

impl CatalogError {
    pub(crate) fn not_found(id: &str) -> Self {
        CatalogError::NotFound { id: id.to_string() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
