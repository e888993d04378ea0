use thiserror::Error;

/// Failure of a catalog operation.
///
/// Every variant is request-scoped and recoverable. Callers decide whether an
/// operation is worth retrying; nothing in this crate retries on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed, missing or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule was violated, a relation to remove was absent, or a
    /// protected row is still referenced.
    #[error("{0}")]
    Conflict(String),

    /// The actor may not perform the operation on this entity.
    #[error("{0}")]
    Forbidden(String),

    /// The backing store failed unexpectedly.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CatalogError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CatalogError::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CatalogError::Forbidden(message.into())
    }
}
