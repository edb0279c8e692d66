//! Handlers for the `/walk-participants` resource and event applications.
//!
//! Application, approval, rejection, and cancellation all run through the
//! transactional workflow in [`WalkParticipantRepo`]; these handlers only
//! resolve the caller's identity, enforce authorization, and map outcomes
//! to HTTP responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use barkpark_core::error::CoreError;
use barkpark_core::participation::{can_cancel_participation, validate_participant_status};
use barkpark_core::roles::is_admin;
use barkpark_core::types::DbId;
use barkpark_db::models::walk_participant::{ApplyParticipation, WalkParticipantFilter};
use barkpark_db::repositories::{
    clamp_limit, clamp_offset, DogRepo, OwnerRepo, WalkParticipantRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /walk-events/{event_id}/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub dog_id: DbId,
    pub notes: Option<String>,
}

/// Query parameters for `GET /walk-participants`.
#[derive(Debug, Deserialize)]
pub struct WalkParticipantListQuery {
    pub event_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/walk-events/{event_id}/apply
///
/// Register one of the caller's dogs for an event. The caller must have an
/// owner profile and the dog must belong to them; the application itself is
/// inserted as `reserved` by the workflow transaction.
pub async fn apply_to_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<ApplyRequest>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("No owner profile is linked to this account".into())
        })?;

    if !DogRepo::belongs_to_owner(&state.pool, input.dog_id, owner.id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "This dog does not belong to you".into(),
        )));
    }

    let participant = WalkParticipantRepo::apply(
        &state.pool,
        &ApplyParticipation {
            walk_event_id: event_id,
            owner_id: owner.id,
            dog_id: input.dog_id,
            notes: input.notes,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        event_id,
        dog_id = input.dog_id,
        participant_id = participant.id,
        "Walk participation applied"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: participant })))
}

/// GET /api/v1/walk-participants
///
/// Administrators see every participant, optionally filtered. Regular
/// callers are implicitly scoped to their own owner record; a caller with
/// no owner record gets an empty list, not an error.
pub async fn list_walk_participants(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<WalkParticipantListQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &params.status {
        validate_participant_status(status).map_err(AppError::Core)?;
    }

    let mut filter = WalkParticipantFilter {
        event_id: params.event_id,
        status: params.status,
        owner_id: None,
    };

    if !is_admin(&auth.role) {
        match OwnerRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(owner) => filter.owner_id = Some(owner.id),
            None => {
                return Ok(Json(DataResponse { data: Vec::new() }));
            }
        }
    }

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let participants = WalkParticipantRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: participants }))
}

/// GET /api/v1/walk-participants/{participant_id}
///
/// Visible to administrators and to the owning party.
pub async fn get_walk_participant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(participant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let participant = WalkParticipantRepo::find_by_id(&state.pool, participant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkParticipant",
            id: participant_id,
        }))?;

    if !is_admin(&auth.role) {
        let owner = OwnerRepo::find_by_user_id(&state.pool, auth.user_id).await?;
        if owner.map(|o| o.id) != Some(participant.owner_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not authorized to view this participation record".into(),
            )));
        }
    }

    Ok(Json(DataResponse { data: participant }))
}

/// PUT /api/v1/walk-participants/{participant_id}/approve
///
/// Allocate a capacity slot to a pending application. Admission control
/// (the live capacity re-check) happens inside the workflow transaction.
pub async fn approve_walk_participant(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(participant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let participant = WalkParticipantRepo::approve(&state.pool, participant_id).await?;

    tracing::info!(
        user_id = user.user_id,
        participant_id,
        event_id = participant.walk_event_id,
        "Walk participation approved"
    );

    Ok(Json(DataResponse { data: participant }))
}

/// PUT /api/v1/walk-participants/{participant_id}/reject
///
/// Mark a participant `absent`. Also used to retract an earlier approval,
/// which may reopen a full event.
pub async fn reject_walk_participant(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(participant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let participant = WalkParticipantRepo::reject(&state.pool, participant_id).await?;

    tracing::info!(
        user_id = user.user_id,
        participant_id,
        event_id = participant.walk_event_id,
        "Walk participation rejected"
    );

    Ok(Json(DataResponse { data: participant }))
}

/// DELETE /api/v1/walk-participants/{participant_id}
///
/// Withdraw an application. Allowed for administrators and for the owning
/// party; the row is hard-deleted and nothing is touched on a failed
/// authorization check.
pub async fn cancel_walk_participant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(participant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let participant = WalkParticipantRepo::find_by_id(&state.pool, participant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalkParticipant",
            id: participant_id,
        }))?;

    let caller_owner_id = OwnerRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .map(|o| o.id);

    if !can_cancel_participation(&auth.role, caller_owner_id, participant.owner_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to cancel this participation record".into(),
        )));
    }

    WalkParticipantRepo::cancel(&state.pool, participant_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        participant_id,
        event_id = participant.walk_event_id,
        "Walk participation cancelled"
    );

    Ok(StatusCode::NO_CONTENT)
}
