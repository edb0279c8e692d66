//! Route definitions for walk events.
//!
//! The per-event `apply` route lives here because it is addressed by event,
//! but its handler belongs to the participation module.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{walk_events, walk_participants};
use crate::state::AppState;

/// Routes mounted at `/walk-events`.
///
/// ```text
/// GET    /                        -> list_walk_events
/// POST   /                        -> create_walk_event (admin)
/// GET    /{event_id}              -> get_walk_event
/// PATCH  /{event_id}              -> update_walk_event (admin or organizer)
/// POST   /{event_id}/cancel       -> cancel_walk_event (admin, sticky)
/// POST   /{event_id}/apply        -> apply_to_event (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(walk_events::list_walk_events).post(walk_events::create_walk_event),
        )
        .route(
            "/{event_id}",
            get(walk_events::get_walk_event).patch(walk_events::update_walk_event),
        )
        .route("/{event_id}/cancel", post(walk_events::cancel_walk_event))
        .route("/{event_id}/apply", post(walk_participants::apply_to_event))
}
