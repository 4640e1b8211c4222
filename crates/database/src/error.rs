//! Database error types.

use thiserror::Error;

/// Errors from the parameter store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Scope name other than `gateway`, `roster` or `send`.
    #[error("unknown parameter scope: {0}")]
    UnknownScope(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
