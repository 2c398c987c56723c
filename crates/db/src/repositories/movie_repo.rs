//! Repository for the `movies` table and its `movie_genres` / `movie_actors`
//! junction tables.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::MovieActor;
use crate::models::genre::MovieGenre;
use crate::models::movie::{CreateMovie, Movie, MovieFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, duration, image, created_at, updated_at";

/// Provides create, read and image operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie together with its genre and actor associations.
    ///
    /// Runs in one transaction; an unknown genre or actor id fails the whole
    /// insert with a foreign-key violation.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO movies (title, description, duration)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&insert_query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .fetch_one(&mut *tx)
            .await?;

        if !input.genres.is_empty() {
            sqlx::query(
                "INSERT INTO movie_genres (movie_id, genre_id)
                 SELECT $1, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(movie.id)
            .bind(&input.genres)
            .execute(&mut *tx)
            .await?;
        }

        if !input.actors.is_empty() {
            sqlx::query(
                "INSERT INTO movie_actors (movie_id, actor_id)
                 SELECT $1, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(movie.id)
            .bind(&input.actors)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(movie)
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List movies matching `filter`, ordered by ID.
    ///
    /// Each filter is skipped when `None`. The genre and actor filters use
    /// `EXISTS` so a movie matching several ids is returned once.
    pub async fn list(pool: &PgPool, filter: &MovieFilter) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE ($1::TEXT IS NULL OR title ILIKE $1)
               AND ($2::BIGINT[] IS NULL OR EXISTS (
                    SELECT 1 FROM movie_genres mg
                    WHERE mg.movie_id = movies.id AND mg.genre_id = ANY($2)))
               AND ($3::BIGINT[] IS NULL OR EXISTS (
                    SELECT 1 FROM movie_actors ma
                    WHERE ma.movie_id = movies.id AND ma.actor_id = ANY($3)))
             ORDER BY id"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(filter.title_pattern.as_deref())
            .bind(filter.genre_ids.as_deref())
            .bind(filter.actor_ids.as_deref())
            .fetch_all(pool)
            .await
    }

    /// Genres attached to any of `movie_ids`, ordered by movie then genre ID.
    pub async fn genres_for_movies(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<Vec<MovieGenre>, sqlx::Error> {
        sqlx::query_as::<_, MovieGenre>(
            "SELECT mg.movie_id, g.id, g.name
             FROM movie_genres mg
             JOIN genres g ON g.id = mg.genre_id
             WHERE mg.movie_id = ANY($1)
             ORDER BY mg.movie_id, g.id",
        )
        .bind(movie_ids)
        .fetch_all(pool)
        .await
    }

    /// Actors attached to any of `movie_ids`, ordered by movie then actor ID.
    pub async fn actors_for_movies(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<Vec<MovieActor>, sqlx::Error> {
        sqlx::query_as::<_, MovieActor>(
            "SELECT ma.movie_id, a.id, a.first_name, a.last_name
             FROM movie_actors ma
             JOIN actors a ON a.id = ma.actor_id
             WHERE ma.movie_id = ANY($1)
             ORDER BY ma.movie_id, a.id",
        )
        .bind(movie_ids)
        .fetch_all(pool)
        .await
    }

    /// Genre IDs attached to one movie.
    pub async fn genre_ids(pool: &PgPool, movie_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT genre_id FROM movie_genres WHERE movie_id = $1 ORDER BY genre_id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Actor IDs attached to one movie.
    pub async fn actor_ids(pool: &PgPool, movie_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT actor_id FROM movie_actors WHERE movie_id = $1 ORDER BY actor_id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Point a movie at a newly stored image.
    ///
    /// Returns the updated row together with the image path it replaced, or
    /// `None` if the movie does not exist. The row is locked while the old
    /// path is read, so concurrent uploads each see the path they displaced.
    pub async fn set_image(
        pool: &PgPool,
        id: DbId,
        image: &str,
    ) -> Result<Option<(Movie, Option<String>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(Option<String>,)> =
            sqlx::query_as("SELECT image FROM movies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous,)) = previous else {
            return Ok(None);
        };

        let query = format!("UPDATE movies SET image = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(image)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((movie, previous)))
    }
}
