use barkpark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `dogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub breed: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for registering a dog under an owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDog {
    pub owner_id: DbId,
    pub name: String,
    pub breed: Option<String>,
    pub notes: Option<String>,
}
