//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`City2CityError`] via `From`. Store failures keep the original error as
//! their [`source`](std::error::Error::source).

/// Boxed error carried by store-originated variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by every repository and service operation.
#[derive(Debug, thiserror::Error)]
pub enum City2CityError {
    /// Caller input was rejected before reaching the store.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A row expected to exist was not found.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A foreign-key, uniqueness, not-null or check constraint was violated.
    #[error("constraint violation")]
    ConstraintViolation(#[source] BoxError),

    /// The store could not be reached (connection, transport, pool).
    #[error("store unavailable")]
    StoreUnavailable(#[source] BoxError),

    /// A result row did not have the expected columns or types.
    #[error("result shape mismatch")]
    ScanMismatch(#[source] BoxError),

    /// Any other store failure.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("price must be a finite, non-negative number")]
    InvalidPrice,

    #[error("page must be at least 1")]
    InvalidPage,

    #[error("limit must be at least 1")]
    InvalidLimit,

    #[error("unknown car status {0:?}")]
    UnknownCarStatus(String),
}

/// A lookup by identifier matched no row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Human readable entity kind, e.g. `"Trip"`.
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

impl NotFoundError {
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

/// Reject blank (empty or whitespace-only) text fields.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}
