//! Walk participant models and list filters.

use barkpark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `walk_participants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WalkParticipant {
    pub id: DbId,
    pub walk_event_id: DbId,
    pub owner_id: DbId,
    pub dog_id: DbId,
    pub status: String,
    pub fee_paid: bool,
    pub refunded: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Input for a new application. The row is inserted as `reserved` with
/// `fee_paid = false` and `refunded = false`.
#[derive(Debug, Clone)]
pub struct ApplyParticipation {
    pub walk_event_id: DbId,
    pub owner_id: DbId,
    pub dog_id: DbId,
    pub notes: Option<String>,
}

/// Filters for participant listing.
///
/// `owner_id` is set by the API layer for non-admin callers so the listing
/// is implicitly scoped to their own applications.
#[derive(Debug, Clone, Default)]
pub struct WalkParticipantFilter {
    pub event_id: Option<DbId>,
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
}
