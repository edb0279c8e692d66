//! Handlers for the `/walk-events` resource.
//!
//! Events are created and cancelled by administrators; cancellation is
//! sticky and is the only explicit status write -- `closed` is derived by
//! the participation workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use barkpark_core::error::CoreError;
use barkpark_core::roles::is_admin;
use barkpark_core::types::DbId;
use barkpark_db::models::walk_event::{CreateWalkEvent, UpdateWalkEvent, WalkEventFilter};
use barkpark_db::repositories::{clamp_limit, clamp_offset, WalkEventRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /walk-events`.
#[derive(Debug, Deserialize)]
pub struct WalkEventListQuery {
    pub status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/walk-events
///
/// Create a walk event. Requires administrator privileges; the caller
/// becomes the organizer.
pub async fn create_walk_event(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateWalkEvent>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let event = WalkEventRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        event_id = event.id,
        capacity = event.capacity,
        "Walk event created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/walk-events
///
/// List walk events, upcoming first, with optional status and date filters.
pub async fn list_walk_events(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<WalkEventListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = WalkEventFilter {
        status: params.status,
        date_from: params.date_from,
        date_to: params.date_to,
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let events = WalkEventRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/walk-events/{event_id}
pub async fn get_walk_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = WalkEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkEvent",
            id: event_id,
        }))?;

    Ok(Json(DataResponse { data: event }))
}

/// PATCH /api/v1/walk-events/{event_id}
///
/// Update organizer-editable fields. Allowed for administrators and for the
/// event's organizer.
pub async fn update_walk_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(patch): Json<UpdateWalkEvent>,
) -> AppResult<impl IntoResponse> {
    let event = WalkEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkEvent",
            id: event_id,
        }))?;

    if !is_admin(&auth.role) && event.organizer_user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to update this walk event".into(),
        )));
    }

    let updated = WalkEventRepo::update(&state.pool, event_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkEvent",
            id: event_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/walk-events/{event_id}/cancel
///
/// Explicitly cancel an event. Sticky: participant-count changes never
/// revert it. Requires administrator privileges.
pub async fn cancel_walk_event(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = WalkEventRepo::cancel(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkEvent",
            id: event_id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        event_id = event.id,
        "Walk event cancelled"
    );

    Ok(Json(DataResponse { data: event }))
}
