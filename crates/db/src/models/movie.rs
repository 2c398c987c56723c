//! Movie entity model, DTOs and response shapes.
//!
//! Movies are exposed in three shapes:
//! - [`MovieListItem`]: genres as names and actors as full names
//! - [`MovieDetail`]: genres and actors as nested objects
//! - [`MovieCreated`]: genres and actors as ids, echoed after create
//!
//! `image` is always rendered as a public URL (or `null`), never as the
//! stored relative path.

use cinema_core::media::public_url;
use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::actor::MovieActor;
use super::genre::MovieGenre;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    /// Path relative to the media root, `None` until an image is uploaded.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Movie {
    pub fn image_url(&self, media_url: &str) -> Option<String> {
        self.image.as_deref().map(|path| public_url(media_url, path))
    }
}

/// DTO for creating a new movie.
///
/// Images are never accepted here; they go through the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i32,
    #[serde(default)]
    pub genres: Vec<DbId>,
    #[serde(default)]
    pub actors: Vec<DbId>,
}

/// Filters for [`MovieRepo::list`](crate::repositories::MovieRepo::list).
///
/// Filters combine with AND. Within an id set a movie matches if it has any
/// of the listed ids.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// Escaped `ILIKE` pattern, e.g. `%star%`.
    pub title_pattern: Option<String>,
    pub genre_ids: Option<Vec<DbId>>,
    pub actor_ids: Option<Vec<DbId>>,
}

/// Nested genre in [`MovieDetail`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRef {
    pub id: DbId,
    pub name: String,
}

/// Nested actor in [`MovieDetail`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRef {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<&MovieActor> for ActorRef {
    fn from(actor: &MovieActor) -> Self {
        Self {
            id: actor.id,
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            full_name: actor.full_name(),
        }
    }
}

/// List shape of a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieListItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub image: Option<String>,
}

impl MovieListItem {
    /// Build the list shape from a movie and its batch-loaded relations.
    ///
    /// `genres` and `actors` may contain rows for other movies; only the
    /// ones belonging to `movie` are used.
    pub fn build(
        movie: &Movie,
        genres: &[MovieGenre],
        actors: &[MovieActor],
        media_url: &str,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            duration: movie.duration,
            genres: genres
                .iter()
                .filter(|g| g.movie_id == movie.id)
                .map(|g| g.name.clone())
                .collect(),
            actors: actors
                .iter()
                .filter(|a| a.movie_id == movie.id)
                .map(MovieActor::full_name)
                .collect(),
            image: movie.image_url(media_url),
        }
    }
}

/// Detail shape of a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<GenreRef>,
    pub actors: Vec<ActorRef>,
    pub image: Option<String>,
}

impl MovieDetail {
    pub fn build(
        movie: &Movie,
        genres: &[MovieGenre],
        actors: &[MovieActor],
        media_url: &str,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            duration: movie.duration,
            genres: genres
                .iter()
                .filter(|g| g.movie_id == movie.id)
                .map(|g| GenreRef {
                    id: g.id,
                    name: g.name.clone(),
                })
                .collect(),
            actors: actors
                .iter()
                .filter(|a| a.movie_id == movie.id)
                .map(ActorRef::from)
                .collect(),
            image: movie.image_url(media_url),
        }
    }
}

/// Response body after creating a movie.
#[derive(Debug, Clone, Serialize)]
pub struct MovieCreated {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<DbId>,
    pub actors: Vec<DbId>,
}

/// Response body after uploading a movie image.
#[derive(Debug, Clone, Serialize)]
pub struct MovieImage {
    pub id: DbId,
    pub image: Option<String>,
}
