//! Pure domain logic for the Barkpark backend.
//!
//! Nothing in this crate performs I/O. It holds the error taxonomy, shared
//! ID and timestamp types, role constants, and the walk-event participation
//! state machine consumed by the `db` and `api` crates.

pub mod error;
pub mod participation;
pub mod roles;
pub mod types;
