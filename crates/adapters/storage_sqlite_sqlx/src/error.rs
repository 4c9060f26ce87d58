//! Storage-specific error type wrapping sqlx errors.

use purgehub_domain::error::PurgeHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Failed to create the directory holding the database file.
    #[error("cannot prepare database directory")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for PurgeHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
