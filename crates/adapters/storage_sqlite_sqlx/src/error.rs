//! Storage-specific error type wrapping sqlx errors.

use sqlx::error::ErrorKind;

use city2city_domain::error::City2CityError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for City2CityError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(err) => classify(err),
            StorageError::Migration(err) => Self::Storage(Box::new(err)),
        }
    }
}

/// Sort a sqlx error into the workspace error taxonomy, keeping it as the
/// source.
fn classify(err: sqlx::Error) -> City2CityError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => City2CityError::ConstraintViolation(Box::new(err)),
            _ => City2CityError::Storage(Box::new(err)),
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => City2CityError::StoreUnavailable(Box::new(err)),
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => City2CityError::ScanMismatch(Box::new(err)),
        _ => City2CityError::Storage(Box::new(err)),
    }
}
