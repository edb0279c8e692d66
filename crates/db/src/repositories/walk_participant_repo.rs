//! The walk-event participation workflow.
//!
//! Application, approval, rejection, and cancellation each run as a single
//! transaction. Rows are locked with `SELECT ... FOR UPDATE` in a fixed
//! order (participant first, then event) so concurrent operations on the
//! same event serialize instead of deadlocking. The participated count is
//! always a live query under that lock; there is no cached counter to drift.

use barkpark_core::participation::{
    recompute_event_status, EVENT_SCHEDULED, PARTICIPANT_ABSENT, PARTICIPANT_PARTICIPATED,
    PARTICIPANT_RESERVED,
};
use barkpark_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::walk_event_repo::COLUMNS as EVENT_COLUMNS;
use crate::models::walk_event::WalkEvent;
use crate::models::walk_participant::{
    ApplyParticipation, WalkParticipant, WalkParticipantFilter,
};

/// Column list for walk_participants queries.
const COLUMNS: &str = "id, walk_event_id, owner_id, dog_id, status, fee_paid, refunded, \
    notes, created_at";

/// Failure modes of the participation workflow.
///
/// Workflow methods run as one transaction; any error rolls the whole
/// operation back, so no partial write survives a rejected precondition.
#[derive(Debug, thiserror::Error)]
pub enum ParticipationError {
    #[error("walk event {0} not found")]
    EventNotFound(DbId),

    #[error("walk participant {0} not found")]
    ParticipantNotFound(DbId),

    /// The event is not in `scheduled` status.
    #[error("event is not accepting new applications")]
    EventNotOpen,

    /// Re-approving is a caller error, not a no-op.
    #[error("participant is already approved")]
    AlreadyApproved,

    /// The live participated count reached capacity at check time.
    #[error("event has reached maximum capacity")]
    CapacityExceeded,

    /// The (event, owner, dog) uniqueness constraint rejected the insert.
    #[error("this dog is already registered for this event")]
    DuplicateApplication,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Lifecycle operations for the `walk_participants` table, including the
/// capacity-derived event status bookkeeping.
pub struct WalkParticipantRepo;

impl WalkParticipantRepo {
    /// Register a dog for an event.
    ///
    /// The event row is locked for the duration of the transaction: the
    /// open-for-applications and capacity checks cannot race a concurrent
    /// approval. Duplicate applications are rejected by the storage
    /// uniqueness constraint and surfaced as
    /// [`ParticipationError::DuplicateApplication`]. Event status is never
    /// touched here: a `reserved` row does not hold a slot.
    pub async fn apply(
        pool: &PgPool,
        input: &ApplyParticipation,
    ) -> Result<WalkParticipant, ParticipationError> {
        let mut tx = pool.begin().await?;

        let event = lock_event(&mut tx, input.walk_event_id)
            .await?
            .ok_or(ParticipationError::EventNotFound(input.walk_event_id))?;

        if event.status != EVENT_SCHEDULED {
            return Err(ParticipationError::EventNotOpen);
        }

        let participated = count_participated_tx(&mut tx, event.id).await?;
        if participated >= i64::from(event.capacity) {
            return Err(ParticipationError::CapacityExceeded);
        }

        let query = format!(
            "INSERT INTO walk_participants (walk_event_id, owner_id, dog_id, status, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, WalkParticipant>(&query)
            .bind(input.walk_event_id)
            .bind(input.owner_id)
            .bind(input.dog_id)
            .bind(PARTICIPANT_RESERVED)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await;

        let participant = match inserted {
            Ok(row) => row,
            Err(err) if is_unique_violation(&err) => {
                return Err(ParticipationError::DuplicateApplication);
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit().await?;
        Ok(participant)
    }

    /// Approve a pending application, allocating one capacity slot.
    ///
    /// The capacity check runs against the live participated count under the
    /// event row lock, immediately before the status write: two approvals
    /// racing for the last slot cannot both succeed. Approval is not
    /// idempotent; an already-participated row fails with
    /// [`ParticipationError::AlreadyApproved`].
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<WalkParticipant, ParticipationError> {
        let mut tx = pool.begin().await?;

        let participant = lock_participant(&mut tx, id)
            .await?
            .ok_or(ParticipationError::ParticipantNotFound(id))?;

        if participant.status == PARTICIPANT_PARTICIPATED {
            return Err(ParticipationError::AlreadyApproved);
        }

        let event = lock_event(&mut tx, participant.walk_event_id)
            .await?
            .ok_or(ParticipationError::EventNotFound(participant.walk_event_id))?;

        let participated = count_participated_tx(&mut tx, event.id).await?;
        if participated >= i64::from(event.capacity) {
            return Err(ParticipationError::CapacityExceeded);
        }

        let query =
            format!("UPDATE walk_participants SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, WalkParticipant>(&query)
            .bind(id)
            .bind(PARTICIPANT_PARTICIPATED)
            .fetch_one(&mut *tx)
            .await?;

        recompute_status_tx(&mut tx, &event).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Mark a participant `absent`.
    ///
    /// Valid from any prior status, including `participated` (retracting an
    /// approval). Retraction may free a slot, so the event status is
    /// recomputed when the prior status held one.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<WalkParticipant, ParticipationError> {
        let mut tx = pool.begin().await?;

        let participant = lock_participant(&mut tx, id)
            .await?
            .ok_or(ParticipationError::ParticipantNotFound(id))?;

        let query =
            format!("UPDATE walk_participants SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, WalkParticipant>(&query)
            .bind(id)
            .bind(PARTICIPANT_ABSENT)
            .fetch_one(&mut *tx)
            .await?;

        if participant.status == PARTICIPANT_PARTICIPATED {
            let event = lock_event(&mut tx, participant.walk_event_id)
                .await?
                .ok_or(ParticipationError::EventNotFound(participant.walk_event_id))?;
            recompute_status_tx(&mut tx, &event).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Hard-delete a participant row.
    ///
    /// Authorization happens in the API layer before this is called. The
    /// event status is recomputed when the deleted row held a slot.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<(), ParticipationError> {
        let mut tx = pool.begin().await?;

        let participant = lock_participant(&mut tx, id)
            .await?
            .ok_or(ParticipationError::ParticipantNotFound(id))?;

        sqlx::query("DELETE FROM walk_participants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if participant.status == PARTICIPANT_PARTICIPATED {
            let event = lock_event(&mut tx, participant.walk_event_id)
                .await?
                .ok_or(ParticipationError::EventNotFound(participant.walk_event_id))?;
            recompute_status_tx(&mut tx, &event).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Find a participant by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WalkParticipant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM walk_participants WHERE id = $1");
        sqlx::query_as::<_, WalkParticipant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List participants matching the filter, most recently created first.
    pub async fn list(
        pool: &PgPool,
        filter: &WalkParticipantFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalkParticipant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM walk_participants
             WHERE ($1::BIGINT IS NULL OR walk_event_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR owner_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, WalkParticipant>(&query)
            .bind(filter.event_id)
            .bind(&filter.status)
            .bind(filter.owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count participants of an event holding `participated` status.
    pub async fn count_participated(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM walk_participants WHERE walk_event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(PARTICIPANT_PARTICIPATED)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

/// Lock a participant row for the duration of the transaction.
async fn lock_participant(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Option<WalkParticipant>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM walk_participants WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, WalkParticipant>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Lock an event row for the duration of the transaction. Capacity checks
/// and status writes for one event serialize on this lock.
async fn lock_event(conn: &mut PgConnection, id: DbId) -> Result<Option<WalkEvent>, sqlx::Error> {
    let query = format!("SELECT {EVENT_COLUMNS} FROM walk_events WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, WalkEvent>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Live participated count inside the current transaction.
async fn count_participated_tx(conn: &mut PgConnection, event_id: DbId) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM walk_participants WHERE walk_event_id = $1 AND status = $2",
    )
    .bind(event_id)
    .bind(PARTICIPANT_PARTICIPATED)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row.0)
}

/// Re-derive and persist the event status from the live participated count.
///
/// `event` must be the locked row; `event.status` is the value the rule
/// compares against.
async fn recompute_status_tx(conn: &mut PgConnection, event: &WalkEvent) -> Result<(), sqlx::Error> {
    let participated = count_participated_tx(conn, event.id).await?;
    if let Some(next) = recompute_event_status(&event.status, participated, event.capacity) {
        sqlx::query("UPDATE walk_events SET status = $2 WHERE id = $1")
            .bind(event.id)
            .bind(next)
            .execute(&mut *conn)
            .await?;
        tracing::debug!(event_id = event.id, status = next, "event status recomputed");
    }
    Ok(())
}

/// PostgreSQL unique violations surface as error code 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
