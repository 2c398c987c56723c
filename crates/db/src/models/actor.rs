//! Actor entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `actors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

impl Actor {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// An actor attached to a movie, as returned by batch lookups.
#[derive(Debug, Clone, FromRow)]
pub struct MovieActor {
    pub movie_id: DbId,
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

impl MovieActor {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// DTO for creating a new actor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActor {
    pub first_name: String,
    pub last_name: String,
}
