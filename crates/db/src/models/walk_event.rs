//! Walk event models and list filters.

use barkpark_core::types::{DbId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `walk_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WalkEvent {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub location: String,
    /// Maximum number of dogs that may hold participated status at once.
    pub capacity: i32,
    /// Whole currency units; `None` means the event is free.
    pub fee: Option<i32>,
    pub organizer_user_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for creating a walk event. New events always start as `scheduled`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWalkEvent {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(range(min = 0))]
    pub fee: Option<i32>,
}

/// Organizer-editable fields. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWalkEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub fee: Option<i32>,
}

/// Filters for event listing.
#[derive(Debug, Clone, Default)]
pub struct WalkEventFilter {
    pub status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
