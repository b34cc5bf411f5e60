//! SQLite schema definitions for the catalog database.
//!
//! One row per book. The text `id` is the catalog identifier, the integer
//! rowid is only an implementation detail of SQLite.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

pub const TABLE_BOOKS: &str = "books";

/// Books table - V0
const BOOKS_TABLE_V_0: Table = Table {
    name: TABLE_BOOKS,
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("status", &SqlType::Text, non_null = true), // 'available', 'checked_out'
    ],
    indices: &[("idx_books_title", "title")],
    unique_constraints: &[&["id"]],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[BOOKS_TABLE_V_0],
}];

pub fn latest_schema() -> &'static VersionedSchema {
    &CATALOG_VERSIONED_SCHEMAS[CATALOG_VERSIONED_SCHEMAS.len() - 1]
}

pub fn schema_for_version(version: usize) -> Option<&'static VersionedSchema> {
    CATALOG_VERSIONED_SCHEMAS
        .iter()
        .find(|schema| schema.version == version)
}
