//! Validation for catalog entities.
//!
//! Provides validation functions to ensure data integrity before
//! inserting or updating books in the catalog store.

use super::models::{Book, Catalog};
use std::fmt;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    DuplicateId { id: String },
    InvalidStatus { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::DuplicateId { id } => {
                write!(f, "A book with id '{}' already exists", id)
            }
            ValidationError::InvalidStatus { value } => {
                write!(
                    f,
                    "Unknown status '{}', expected 'Available' or 'Checked Out'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the fields of a book on their own
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    if book.id.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "id" });
    }
    validate_mutable_fields(&book.title, &book.author)
}

/// Validate the fields an update is allowed to change
pub fn validate_mutable_fields(title: &str, author: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    if author.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "author" });
    }
    Ok(())
}

/// Validate a book that is about to be added to `catalog`
pub fn validate_new_book(catalog: &Catalog, book: &Book) -> ValidationResult<()> {
    validate_book(book)?;
    if catalog.contains(&book.id) {
        return Err(ValidationError::DuplicateId {
            id: book.id.clone(),
        });
    }
    Ok(())
}
