//! Repository for the `walk_events` table.
//!
//! Event status is only ever written here (explicit cancellation) or by the
//! participation workflow's recomputation rule in
//! [`super::walk_participant_repo`].

use barkpark_core::participation::{EVENT_CANCELLED, EVENT_SCHEDULED};
use barkpark_core::types::DbId;
use sqlx::PgPool;

use crate::models::walk_event::{CreateWalkEvent, UpdateWalkEvent, WalkEvent, WalkEventFilter};

/// Column list for walk_events queries.
pub(crate) const COLUMNS: &str = "id, title, description, event_date, start_time, location, \
    capacity, fee, organizer_user_id, status, created_at";

/// CRUD operations for the `walk_events` table.
pub struct WalkEventRepo;

impl WalkEventRepo {
    /// Insert a new event. New events always start as `scheduled`.
    pub async fn create(
        pool: &PgPool,
        organizer_user_id: DbId,
        input: &CreateWalkEvent,
    ) -> Result<WalkEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO walk_events
                (title, description, event_date, start_time, location, capacity, fee,
                 organizer_user_id, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WalkEvent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(input.start_time)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(input.fee)
            .bind(organizer_user_id)
            .bind(EVENT_SCHEDULED)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WalkEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM walk_events WHERE id = $1");
        sqlx::query_as::<_, WalkEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events matching the filter, upcoming first.
    pub async fn list(
        pool: &PgPool,
        filter: &WalkEventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalkEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM walk_events
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::DATE IS NULL OR event_date >= $2)
               AND ($3::DATE IS NULL OR event_date <= $3)
             ORDER BY event_date ASC, start_time ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, WalkEvent>(&query)
            .bind(&filter.status)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch organizer-editable fields; `None` fields are left unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateWalkEvent,
    ) -> Result<Option<WalkEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE walk_events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                fee = COALESCE($5, fee)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WalkEvent>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(&patch.location)
            .bind(patch.fee)
            .fetch_optional(pool)
            .await
    }

    /// Mark an event `cancelled`. Sticky: the participation workflow never
    /// reverts it. Returns `None` if the event does not exist.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<WalkEvent>, sqlx::Error> {
        let query = format!("UPDATE walk_events SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WalkEvent>(&query)
            .bind(id)
            .bind(EVENT_CANCELLED)
            .fetch_optional(pool)
            .await
    }
}
