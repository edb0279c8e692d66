//! Route definitions for walk participation records.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::walk_participants;
use crate::state::AppState;

/// Routes mounted at `/walk-participants`.
///
/// ```text
/// GET    /                              -> list_walk_participants
/// GET    /{participant_id}              -> get_walk_participant
/// DELETE /{participant_id}              -> cancel_walk_participant (admin or owner)
/// PUT    /{participant_id}/approve      -> approve_walk_participant (admin)
/// PUT    /{participant_id}/reject       -> reject_walk_participant (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(walk_participants::list_walk_participants))
        .route(
            "/{participant_id}",
            get(walk_participants::get_walk_participant)
                .delete(walk_participants::cancel_walk_participant),
        )
        .route(
            "/{participant_id}/approve",
            put(walk_participants::approve_walk_participant),
        )
        .route(
            "/{participant_id}/reject",
            put(walk_participants::reject_walk_participant),
        )
}
