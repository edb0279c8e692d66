//! HTTP error type and response mapping.
//!
//! Every handler returns [`AppResult`]; each [`AppError`] renders as a JSON
//! body `{ "error": <message>, "code": <machine code> }` with a fixed status
//! per variant. Internal failures are logged in full and reach the client as
//! an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use barkpark_core::error::CoreError;
use barkpark_db::repositories::ParticipationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain outcome from `barkpark_core`; carries its own client message.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Workflow outcomes map onto the domain taxonomy; the repository layer
/// deliberately knows nothing about HTTP.
impl From<ParticipationError> for AppError {
    fn from(err: ParticipationError) -> Self {
        let core = match err {
            ParticipationError::EventNotFound(id) => CoreError::NotFound {
                entity: "WalkEvent",
                id,
            },
            ParticipationError::ParticipantNotFound(id) => CoreError::NotFound {
                entity: "WalkParticipant",
                id,
            },
            ParticipationError::EventNotOpen => {
                CoreError::InvalidState("This event is not accepting new applications".into())
            }
            ParticipationError::AlreadyApproved => {
                CoreError::InvalidState("Participant is already approved".into())
            }
            ParticipationError::CapacityExceeded => {
                CoreError::CapacityExceeded("Event has reached maximum capacity".into())
            }
            ParticipationError::DuplicateApplication => CoreError::DuplicateApplication(
                "This dog is already registered for this event".into(),
            ),
            ParticipationError::Db(e) => return AppError::Database(e),
        };
        AppError::Core(core)
    }
}

const OPAQUE_500: (StatusCode, &str) = (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR");

impl AppError {
    /// Resolve this error to `(status, code, client-visible message)`.
    ///
    /// Anything that resolves to a 500 is logged here and its message
    /// replaced; nothing internal leaks into the body.
    fn response_parts(&self) -> (StatusCode, &'static str, String) {
        let (status, code) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CoreError::InvalidState(_) => (StatusCode::BAD_REQUEST, "INVALID_STATE"),
                CoreError::CapacityExceeded(_) => (StatusCode::BAD_REQUEST, "CAPACITY_EXCEEDED"),
                CoreError::DuplicateApplication(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_APPLICATION")
                }
                CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                CoreError::Internal(_) => OPAQUE_500,
            },
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::InternalError(_) => OPAQUE_500,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            match self {
                AppError::Core(core) => core.to_string(),
                AppError::BadRequest(msg) => msg.clone(),
                // Non-500 database errors carry a fixed message from
                // `database_parts`, never the driver's text.
                AppError::Database(err) => database_message(err),
                AppError::InternalError(_) => unreachable!("mapped to 500 above"),
            }
        };

        (status, code, message)
    }
}

/// Status and code for a raw driver error that escaped the repositories.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        sqlx::Error::Database(db) if is_named_unique_violation(db.as_ref()) => {
            (StatusCode::CONFLICT, "CONFLICT")
        }
        _ => OPAQUE_500,
    }
}

fn database_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::RowNotFound => "Resource not found".to_string(),
        sqlx::Error::Database(db) if is_named_unique_violation(db.as_ref()) => format!(
            "Duplicate value violates unique constraint: {}",
            db.constraint().unwrap_or("unknown")
        ),
        _ => "An internal error occurred".to_string(),
    }
}

/// A 23505 violation on one of our named `uq_` constraints.
fn is_named_unique_violation(db: &dyn sqlx::error::DatabaseError) -> bool {
    db.code().as_deref() == Some("23505")
        && db.constraint().is_some_and(|name| name.starts_with("uq_"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.response_parts();
        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}
