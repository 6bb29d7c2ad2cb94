//! Catalog core: the entity graph's integrity rules.
//!
//! Every mutation goes through [`CatalogService`], which resolves foreign
//! references and checks uniqueness inside one transaction before writing
//! anything. Nothing here knows about HTTP or who is calling.

pub mod availability;
pub mod category;
pub mod product;
pub mod reference;

use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionError};
use std::{fmt, sync::Arc};
use thiserror::Error;

pub use category::NewCategory;
pub use product::{ProductDetails, ProductSpec};
pub use reference::{NewCity, NewFeature};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    City,
    Feature,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Category => "Category",
            EntityKind::City => "City",
            EntityKind::Feature => "Feature",
            EntityKind::Product => "Product",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: EntityKind, id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CatalogError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        CatalogError::NotFound { entity, id }
    }

    pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CatalogError::Validation(errors.to_string())
    }
}

impl From<TransactionError<CatalogError>> for CatalogError {
    fn from(err: TransactionError<CatalogError>) -> Self {
        match err {
            TransactionError::Connection(err) => CatalogError::Database(err),
            TransactionError::Transaction(err) => err,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Handle to the catalog. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        CatalogService { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn shared_db(&self) -> Arc<DatabaseConnection> {
        self.db.clone()
    }
}
