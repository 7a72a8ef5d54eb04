use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Requested cabins are already booked for an overlapping stay.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Database(sea_orm::DbErr::Conn(_))
                | DomainError::Database(sea_orm::DbErr::ConnectionAcquire(_))
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
