//! Repository for the `actors` table.

use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

/// Provides create and list operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// List all actors ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY id");
        sqlx::query_as::<_, Actor>(&query).fetch_all(pool).await
    }
}
