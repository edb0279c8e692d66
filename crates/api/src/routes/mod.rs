pub mod health;
pub mod walk_events;
pub mod walk_participants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /walk-events                          list, create
/// /walk-events/{event_id}               get, patch
/// /walk-events/{event_id}/cancel        explicit sticky cancellation (POST)
/// /walk-events/{event_id}/apply         register a dog (POST)
///
/// /walk-participants                    list (admin: all, user: own)
/// /walk-participants/{participant_id}   get, cancel (DELETE)
/// /walk-participants/{participant_id}/approve   approve (PUT)
/// /walk-participants/{participant_id}/reject    reject (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Walk events (also mounts the per-event apply route).
        .nest("/walk-events", walk_events::router())
        // Participation lifecycle: list, approve, reject, cancel.
        .nest("/walk-participants", walk_participants::router())
}
