pub mod walk_events;
pub mod walk_participants;
