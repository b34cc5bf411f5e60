mod error;
mod json_backend;
mod models;
mod schema;
mod sqlite_backend;
mod store;
mod trait_def;
mod validation;

pub use error::CatalogError;
pub use json_backend::{JsonFileCatalogPersistence, JSON_FORMAT_VERSION};
pub use models::*;
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use sqlite_backend::SqliteCatalogPersistence;
pub use store::{load_catalog, CatalogStore};
pub use trait_def::CatalogPersistence;
pub use validation::{ValidationError, ValidationResult};
