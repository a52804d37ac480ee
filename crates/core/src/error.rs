//! Domain error type shared by every Shepherd crate.

use crate::types::DbId;

/// Errors raised by domain logic and mapped to HTTP statuses by the API.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A competing operation holds the resource (duplicate email, import in progress).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
