//! Persistence error taxonomy.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error, mapped onto HTTP statuses at the API boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity absent; the variant carries the entity name for the wire
    /// message ("Product not found", "Sale not found", ...).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness or state conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request was well-formed but cannot be applied.
    #[error("{0}")]
    Invalid(String),

    /// Stock-sufficiency check failed.
    #[error("Insufficient stock")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a unique-constraint violation to a conflict, anything else to a
    /// database error.
    pub fn map_unique(err: sqlx::Error, conflict_msg: &str) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Conflict(conflict_msg.to_string());
            }
        }
        StoreError::Database(err)
    }

    /// Map a foreign-key violation to a not-found on the referenced entity.
    pub fn map_foreign_key(err: sqlx::Error, entity: &'static str) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            if db.is_foreign_key_violation() {
                return StoreError::NotFound(entity);
            }
        }
        StoreError::Database(err)
    }
}
