//! Repository for the `cinema_halls` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::cinema_hall::{CinemaHall, CreateCinemaHall};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, rows, seats_in_row, created_at, updated_at";

/// Provides create and read operations for cinema halls.
pub struct CinemaHallRepo;

impl CinemaHallRepo {
    /// Insert a new cinema hall, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCinemaHall) -> Result<CinemaHall, sqlx::Error> {
        let query = format!(
            "INSERT INTO cinema_halls (name, rows, seats_in_row)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CinemaHall>(&query)
            .bind(&input.name)
            .bind(input.rows)
            .bind(input.seats_in_row)
            .fetch_one(pool)
            .await
    }

    /// Find a cinema hall by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CinemaHall>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cinema_halls WHERE id = $1");
        sqlx::query_as::<_, CinemaHall>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cinema halls ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<CinemaHall>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cinema_halls ORDER BY id");
        sqlx::query_as::<_, CinemaHall>(&query).fetch_all(pool).await
    }
}
