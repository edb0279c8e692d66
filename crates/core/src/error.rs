use crate::types::DbId;

/// Domain-level error taxonomy shared across the workspace.
///
/// The `api` crate maps each variant to a fixed HTTP status code; see its
/// `IntoResponse` implementation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The input failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation is not valid for the entity's current status.
    #[error("{0}")]
    InvalidState(String),

    /// No capacity slot was available at check time.
    #[error("{0}")]
    CapacityExceeded(String),

    /// A uniqueness rule rejected the write.
    #[error("{0}")]
    DuplicateApplication(String),

    /// The write conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
