//! Handlers for the `/cinema/movies` resource.
//!
//! Movies are read by any authenticated user and created by staff. There is
//! no update or delete; the detail route only answers GET, so other verbs
//! get 405 from the router.

use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::filters::{parse_optional_id_list, substring_pattern};
use cinema_core::media::{detect_image, movie_image_path};
use cinema_core::types::DbId;
use cinema_db::models::movie::{
    Movie, MovieCreated, MovieDetail, MovieFilter, MovieImage, MovieListItem,
};
use cinema_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::extract::MovieForm;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::MovieListParams;
use crate::state::AppState;

/// Name of the multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// GET /api/v1/cinema/movies
///
/// Supports `?title=` (case-insensitive substring), `?genres=1,2` and
/// `?actors=3,4` (any of the listed ids). Filters combine with AND.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<Vec<MovieListItem>>> {
    let filter = MovieFilter {
        title_pattern: substring_pattern(params.title.as_deref()),
        genre_ids: parse_optional_id_list(params.genres.as_deref(), "genres")?,
        actor_ids: parse_optional_id_list(params.actors.as_deref(), "actors")?,
    };

    let movies = MovieRepo::list(&state.pool, &filter).await?;
    let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
    let genres = MovieRepo::genres_for_movies(&state.pool, &ids).await?;
    let actors = MovieRepo::actors_for_movies(&state.pool, &ids).await?;

    let media_url = &state.config.media.url;
    let items = movies
        .iter()
        .map(|movie| MovieListItem::build(movie, &genres, &actors, media_url))
        .collect();
    Ok(Json(items))
}

/// GET /api/v1/cinema/movies/{id}
pub async fn retrieve(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieDetail>> {
    let movie = find_movie(&state, id).await?;
    let genres = MovieRepo::genres_for_movies(&state.pool, &[id]).await?;
    let actors = MovieRepo::actors_for_movies(&state.pool, &[id]).await?;
    Ok(Json(MovieDetail::build(
        &movie,
        &genres,
        &actors,
        &state.config.media.url,
    )))
}

/// POST /api/v1/cinema/movies
///
/// Accepts JSON or form data. Unknown genre or actor ids fail the insert
/// with a foreign-key violation, reported as 400.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    MovieForm(input): MovieForm,
) -> AppResult<(StatusCode, Json<MovieCreated>)> {
    let movie = MovieRepo::create(&state.pool, &input).await?;
    let genres = MovieRepo::genre_ids(&state.pool, movie.id).await?;
    let actors = MovieRepo::actor_ids(&state.pool, movie.id).await?;

    tracing::info!(movie_id = movie.id, user_id = user.user_id, "Movie created");
    Ok((
        StatusCode::CREATED,
        Json(MovieCreated {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            genres,
            actors,
        }),
    ))
}

/// POST /api/v1/cinema/movies/{id}/upload-image
///
/// Accepts a multipart form with a required `image` field. The payload must
/// decode as a JPEG, PNG or WebP image. Any previous image file is removed
/// once the new one is recorded.
pub async fn upload_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<MovieImage>> {
    let movie = find_movie(&state, id).await?;

    let mut data: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            data = Some(bytes.to_vec());
        }
    }

    let data = data.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "No file was submitted in the '{IMAGE_FIELD}' field"
        )))
    })?;
    let kind = detect_image(&data)?;

    let relative_path = movie_image_path(&movie.title, kind);
    let file_path = state.config.media.root.join(&relative_path);
    if let Some(parent) = file_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let (updated, previous) = match MovieRepo::set_image(&state.pool, id, &relative_path).await {
        Ok(Some(replaced)) => replaced,
        Ok(None) => {
            remove_media_file(&state.config.media.root, &relative_path).await;
            return Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }));
        }
        Err(e) => {
            remove_media_file(&state.config.media.root, &relative_path).await;
            return Err(e.into());
        }
    };

    if let Some(previous) = previous.as_deref() {
        remove_media_file(&state.config.media.root, previous).await;
    }

    tracing::info!(
        movie_id = id,
        user_id = user.user_id,
        path = %relative_path,
        bytes = data.len(),
        "Movie image uploaded"
    );
    Ok(Json(MovieImage {
        id: updated.id,
        image: updated.image_url(&state.config.media.url),
    }))
}

async fn find_movie(state: &AppState, id: DbId) -> AppResult<Movie> {
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))
}

/// Best-effort removal of a stored media file.
async fn remove_media_file(root: &FsPath, relative_path: &str) {
    let path = root.join(relative_path);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove media file"),
    }
}
