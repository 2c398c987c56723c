//! Genre entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

/// A genre attached to a movie, as returned by batch lookups.
#[derive(Debug, Clone, FromRow)]
pub struct MovieGenre {
    pub movie_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new genre.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}
