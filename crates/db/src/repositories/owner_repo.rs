use barkpark_core::types::DbId;
use sqlx::PgPool;

use crate::models::owner::{CreateOwner, Owner};

/// Column list for owners queries.
const COLUMNS: &str = "id, user_id, name, email, phone, created_at";

/// CRUD operations for the `owners` table.
pub struct OwnerRepo;

impl OwnerRepo {
    /// Insert a new owner, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOwner) -> Result<Owner, sqlx::Error> {
        let query = format!(
            "INSERT INTO owners (user_id, name, email, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Owner>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find an owner by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = $1");
        sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the owner record linked to a user account, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE user_id = $1");
        sqlx::query_as::<_, Owner>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
