//! Walk-event participation state machine.
//!
//! Status constants for events and participants, the capacity-derived event
//! status rule, and the cancellation authorization policy. The `db` crate
//! applies these inside its transactions; keeping them here makes the rules
//! unit-testable without a database.

use crate::error::CoreError;
use crate::roles::is_admin;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Event is open for applications.
pub const EVENT_SCHEDULED: &str = "scheduled";

/// Event is full. Reverts to `scheduled` when a slot frees up.
pub const EVENT_CLOSED: &str = "closed";

/// Event was called off. Sticky: participant-count changes never revert it.
pub const EVENT_CANCELLED: &str = "cancelled";

/// Application received, awaiting an admin decision. Does not hold a slot.
pub const PARTICIPANT_RESERVED: &str = "reserved";

/// Approved by an admin. Holds one capacity slot.
pub const PARTICIPANT_PARTICIPATED: &str = "participated";

/// Rejected, or an earlier approval retracted.
pub const PARTICIPANT_ABSENT: &str = "absent";

/// Withdrawn by the owning party without deleting the row.
pub const PARTICIPANT_CANCELLED: &str = "cancelled";

/// All participant status values accepted in list filters.
pub const VALID_PARTICIPANT_STATUSES: &[&str] = &[
    PARTICIPANT_RESERVED,
    PARTICIPANT_PARTICIPATED,
    PARTICIPANT_ABSENT,
    PARTICIPANT_CANCELLED,
];

/* --------------------------------------------------------------------------
Rules
-------------------------------------------------------------------------- */

/// Validate that a participant status string is one of the accepted values.
pub fn validate_participant_status(status: &str) -> Result<(), CoreError> {
    if VALID_PARTICIPANT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid participant status '{status}'. Must be one of: {}",
            VALID_PARTICIPANT_STATUSES.join(", ")
        )))
    }
}

/// Derive the event status implied by the live participated count.
///
/// Returns `Some(new_status)` when the stored status must change and `None`
/// when it is already consistent. A `cancelled` event is terminal: the rule
/// never overwrites it.
pub fn recompute_event_status(
    current: &str,
    participated_count: i64,
    capacity: i32,
) -> Option<&'static str> {
    if current == EVENT_CANCELLED {
        return None;
    }
    if participated_count >= i64::from(capacity) {
        return (current != EVENT_CLOSED).then_some(EVENT_CLOSED);
    }
    (current == EVENT_CLOSED).then_some(EVENT_SCHEDULED)
}

/// Authorization policy for cancelling a participation record.
///
/// Administrators may cancel anyone's; everyone else only their own. Callers
/// without an owner record pass `None` and are denied unless they are admins.
pub fn can_cancel_participation(
    role: &str,
    caller_owner_id: Option<DbId>,
    participant_owner_id: DbId,
) -> bool {
    is_admin(role) || caller_owner_id == Some(participant_owner_id)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER};

    #[test]
    fn test_valid_statuses_accepted() {
        for status in VALID_PARTICIPANT_STATUSES {
            assert!(validate_participant_status(status).is_ok());
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        let result = validate_participant_status("approved");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid participant status"));
    }

    #[test]
    fn test_scheduled_stays_scheduled_below_capacity() {
        assert_eq!(recompute_event_status(EVENT_SCHEDULED, 0, 5), None);
        assert_eq!(recompute_event_status(EVENT_SCHEDULED, 4, 5), None);
    }

    #[test]
    fn test_scheduled_closes_at_capacity() {
        assert_eq!(
            recompute_event_status(EVENT_SCHEDULED, 5, 5),
            Some(EVENT_CLOSED)
        );
        // Over-capacity counts still resolve to closed.
        assert_eq!(
            recompute_event_status(EVENT_SCHEDULED, 6, 5),
            Some(EVENT_CLOSED)
        );
    }

    #[test]
    fn test_closed_reopens_below_capacity() {
        assert_eq!(
            recompute_event_status(EVENT_CLOSED, 4, 5),
            Some(EVENT_SCHEDULED)
        );
        assert_eq!(
            recompute_event_status(EVENT_CLOSED, 0, 1),
            Some(EVENT_SCHEDULED)
        );
    }

    #[test]
    fn test_closed_stays_closed_at_capacity() {
        assert_eq!(recompute_event_status(EVENT_CLOSED, 5, 5), None);
    }

    #[test]
    fn test_cancelled_is_sticky() {
        assert_eq!(recompute_event_status(EVENT_CANCELLED, 0, 5), None);
        assert_eq!(recompute_event_status(EVENT_CANCELLED, 5, 5), None);
        assert_eq!(recompute_event_status(EVENT_CANCELLED, 99, 5), None);
    }

    #[test]
    fn test_admin_may_cancel_any_participation() {
        assert!(can_cancel_participation(ROLE_ADMIN, None, 7));
        assert!(can_cancel_participation(ROLE_SUPER_ADMIN, Some(1), 7));
    }

    #[test]
    fn test_owner_may_cancel_own_participation() {
        assert!(can_cancel_participation(ROLE_USER, Some(7), 7));
    }

    #[test]
    fn test_stranger_may_not_cancel() {
        assert!(!can_cancel_participation(ROLE_USER, Some(1), 7));
        assert!(!can_cancel_participation(ROLE_USER, None, 7));
    }
}
