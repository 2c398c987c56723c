//! Repository for the `movie_sessions` table.

use chrono::NaiveDate;
use cinema_core::seating;
use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie_session::{
    CreateMovieSession, MovieSession, MovieSessionRow, SessionSeating, SessionUpdate, TakenPlace,
    UpdateMovieSession,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, show_time, movie_id, cinema_hall_id, created_at, updated_at";

/// Joined projection used for list shapes (movie title/image, hall, sold count).
const ROW_SELECT: &str = "SELECT ms.id, ms.show_time,
        ms.movie_id, m.title AS movie_title, m.image AS movie_image,
        ms.cinema_hall_id, ch.name AS cinema_hall_name,
        ch.rows AS cinema_hall_rows, ch.seats_in_row AS cinema_hall_seats_in_row,
        (SELECT COUNT(*) FROM tickets t WHERE t.movie_session_id = ms.id) AS tickets_sold
     FROM movie_sessions ms
     JOIN movies m ON m.id = ms.movie_id
     JOIN cinema_halls ch ON ch.id = ms.cinema_hall_id";

/// Provides CRUD operations for movie sessions.
pub struct MovieSessionRepo;

impl MovieSessionRepo {
    /// Insert a new movie session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMovieSession,
    ) -> Result<MovieSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_sessions (show_time, movie_id, cinema_hall_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieSession>(&query)
            .bind(input.show_time)
            .bind(input.movie)
            .bind(input.cinema_hall)
            .fetch_one(pool)
            .await
    }

    /// Find a movie session by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_sessions WHERE id = $1");
        sqlx::query_as::<_, MovieSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions with their joined list projection, ordered by show time.
    ///
    /// `date` matches the UTC calendar day of `show_time`.
    pub async fn list(
        pool: &PgPool,
        date: Option<NaiveDate>,
        movie_id: Option<DbId>,
    ) -> Result<Vec<MovieSessionRow>, sqlx::Error> {
        let query = format!(
            "{ROW_SELECT}
             WHERE ($1::DATE IS NULL OR (ms.show_time AT TIME ZONE 'UTC')::DATE = $1)
               AND ($2::BIGINT IS NULL OR ms.movie_id = $2)
             ORDER BY ms.show_time, ms.id"
        );
        sqlx::query_as::<_, MovieSessionRow>(&query)
            .bind(date)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// Joined list projection for specific sessions.
    pub async fn rows_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<MovieSessionRow>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE ms.id = ANY($1) ORDER BY ms.id");
        sqlx::query_as::<_, MovieSessionRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a movie session. Only non-`None` fields in `input` are applied.
    ///
    /// Moving the session to another hall is refused when a seat already sold
    /// for it falls outside the new hall. The session row stays locked from
    /// that check until the update commits, so no ticket can slip in between.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovieSession,
    ) -> Result<SessionUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM movie_sessions WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, MovieSession>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(SessionUpdate::NotFound);
        };

        if let Some(hall_id) = input.cinema_hall.filter(|&h| h != current.cinema_hall_id) {
            // An unknown hall falls through to the FK violation on UPDATE.
            let hall: Option<(i32, i32)> =
                sqlx::query_as("SELECT rows, seats_in_row FROM cinema_halls WHERE id = $1")
                    .bind(hall_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            if let Some((rows, seats_in_row)) = hall {
                let taken = sqlx::query_as::<_, TakenPlace>(
                    "SELECT \"row\", seat FROM tickets
                     WHERE movie_session_id = $1
                     ORDER BY \"row\", seat",
                )
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

                if let Some(place) = taken
                    .into_iter()
                    .find(|p| seating::validate_seat(p.row, p.seat, rows, seats_in_row).is_err())
                {
                    return Ok(SessionUpdate::SeatOutsideHall {
                        place,
                        rows,
                        seats_in_row,
                    });
                }
            }
        }

        let query = format!(
            "UPDATE movie_sessions SET
                show_time = COALESCE($2, show_time),
                movie_id = COALESCE($3, movie_id),
                cinema_hall_id = COALESCE($4, cinema_hall_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, MovieSession>(&query)
            .bind(id)
            .bind(input.show_time)
            .bind(input.movie)
            .bind(input.cinema_hall)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SessionUpdate::Updated(session))
    }

    /// Delete a movie session and its tickets. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Seats already sold for a session, ordered by row then seat.
    pub async fn taken_places(
        pool: &PgPool,
        movie_session_id: DbId,
    ) -> Result<Vec<TakenPlace>, sqlx::Error> {
        sqlx::query_as::<_, TakenPlace>(
            "SELECT \"row\", seat FROM tickets
             WHERE movie_session_id = $1
             ORDER BY \"row\", seat",
        )
        .bind(movie_session_id)
        .fetch_all(pool)
        .await
    }

    /// Hall dimensions for each of the given sessions.
    ///
    /// Sessions that do not exist are simply absent from the result.
    pub async fn seating_for_sessions(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<SessionSeating>, sqlx::Error> {
        sqlx::query_as::<_, SessionSeating>(
            "SELECT ms.id AS movie_session_id, ch.rows, ch.seats_in_row
             FROM movie_sessions ms
             JOIN cinema_halls ch ON ch.id = ms.cinema_hall_id
             WHERE ms.id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
