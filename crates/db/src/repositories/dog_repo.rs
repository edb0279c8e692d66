use barkpark_core::types::DbId;
use sqlx::PgPool;

use crate::models::dog::{CreateDog, Dog};

/// Column list for dogs queries.
const COLUMNS: &str = "id, owner_id, name, breed, notes, created_at";

/// CRUD operations for the `dogs` table.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (owner_id, name, breed, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a dog by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the dog exists and is owned by the given owner.
    ///
    /// Checked once at application time; ownership is not re-validated for
    /// existing participant rows.
    pub async fn belongs_to_owner(
        pool: &PgPool,
        dog_id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM dogs WHERE id = $1 AND owner_id = $2)")
                .bind(dog_id)
                .bind(owner_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
