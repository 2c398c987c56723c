//! Cinema hall entity model and DTOs.

use cinema_core::seating;
use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cinema_halls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CinemaHall {
    pub id: DbId,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

impl CinemaHall {
    pub fn capacity(&self) -> i32 {
        seating::capacity(self.rows, self.seats_in_row)
    }
}

/// DTO for creating a new cinema hall.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCinemaHall {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

/// Response shape of a cinema hall, including its computed capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CinemaHallResponse {
    pub id: DbId,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
}

impl From<&CinemaHall> for CinemaHallResponse {
    fn from(hall: &CinemaHall) -> Self {
        Self {
            id: hall.id,
            name: hall.name.clone(),
            rows: hall.rows,
            seats_in_row: hall.seats_in_row,
            capacity: hall.capacity(),
        }
    }
}
