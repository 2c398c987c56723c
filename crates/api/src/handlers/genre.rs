//! Handlers for the `/cinema/genres` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_db::models::genre::{CreateGenre, Genre};
use cinema_db::repositories::GenreRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/cinema/genres
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = GenreRepo::list(&state.pool).await?;
    Ok(Json(genres))
}

/// POST /api/v1/cinema/genres
///
/// A name already in use yields 409 via `uq_genres_name`.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".into(),
        )));
    }

    let genre = GenreRepo::create(&state.pool, &input).await?;
    tracing::info!(genre_id = genre.id, user_id = user.user_id, "Genre created");
    Ok((StatusCode::CREATED, Json(genre)))
}
