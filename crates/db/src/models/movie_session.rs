//! Movie session entity model, DTOs and response shapes.

use cinema_core::media::public_url;
use cinema_core::seating;
use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::cinema_hall::CinemaHallResponse;
use super::movie::MovieListItem;

/// A row from the `movie_sessions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MovieSession {
    pub id: DbId,
    pub show_time: Timestamp,
    #[serde(rename = "movie")]
    pub movie_id: DbId,
    #[serde(rename = "cinema_hall")]
    pub cinema_hall_id: DbId,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

/// A movie session joined with its movie, hall and sold-ticket count.
#[derive(Debug, Clone, FromRow)]
pub struct MovieSessionRow {
    pub id: DbId,
    pub show_time: Timestamp,
    pub movie_id: DbId,
    pub movie_title: String,
    pub movie_image: Option<String>,
    pub cinema_hall_id: DbId,
    pub cinema_hall_name: String,
    pub cinema_hall_rows: i32,
    pub cinema_hall_seats_in_row: i32,
    pub tickets_sold: i64,
}

/// DTO for creating a new movie session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieSession {
    pub show_time: Timestamp,
    pub movie: DbId,
    pub cinema_hall: DbId,
}

/// DTO for updating a movie session. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieSession {
    pub show_time: Option<Timestamp>,
    pub movie: Option<DbId>,
    pub cinema_hall: Option<DbId>,
}

/// Result of [`MovieSessionRepo::update`](crate::repositories::MovieSessionRepo::update).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Updated(MovieSession),
    NotFound,
    /// The requested hall is too small for a seat already sold for the session.
    SeatOutsideHall {
        place: TakenPlace,
        rows: i32,
        seats_in_row: i32,
    },
}

/// Seating dimensions of the hall a session is shown in.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct SessionSeating {
    pub movie_session_id: DbId,
    pub rows: i32,
    pub seats_in_row: i32,
}

/// An occupied seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct TakenPlace {
    pub row: i32,
    pub seat: i32,
}

/// List shape of a movie session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSessionListItem {
    pub id: DbId,
    pub show_time: Timestamp,
    pub movie_title: String,
    pub movie_image: Option<String>,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i32,
    pub tickets_available: i64,
}

impl MovieSessionListItem {
    pub fn build(row: &MovieSessionRow, media_url: &str) -> Self {
        Self {
            id: row.id,
            show_time: row.show_time,
            movie_title: row.movie_title.clone(),
            movie_image: row
                .movie_image
                .as_deref()
                .map(|path| public_url(media_url, path)),
            cinema_hall_name: row.cinema_hall_name.clone(),
            cinema_hall_capacity: seating::capacity(
                row.cinema_hall_rows,
                row.cinema_hall_seats_in_row,
            ),
            tickets_available: seating::tickets_available(
                row.cinema_hall_rows,
                row.cinema_hall_seats_in_row,
                row.tickets_sold,
            ),
        }
    }
}

/// Detail shape of a movie session.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSessionDetail {
    pub id: DbId,
    pub show_time: Timestamp,
    pub movie: MovieListItem,
    pub cinema_hall: CinemaHallResponse,
    pub taken_places: Vec<TakenPlace>,
}
