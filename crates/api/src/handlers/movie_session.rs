//! Handlers for the `/cinema/movie-sessions` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::filters::{parse_date, parse_id};
use cinema_core::types::DbId;
use cinema_db::models::cinema_hall::CinemaHallResponse;
use cinema_db::models::movie::MovieListItem;
use cinema_db::models::movie_session::{
    CreateMovieSession, MovieSession, MovieSessionDetail, MovieSessionListItem, SessionUpdate,
    UpdateMovieSession,
};
use cinema_db::repositories::{CinemaHallRepo, MovieRepo, MovieSessionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::MovieSessionListParams;
use crate::state::AppState;

/// GET /api/v1/cinema/movie-sessions
///
/// Supports `?date=YYYY-MM-DD` (UTC day of the show time) and `?movie=<id>`.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<MovieSessionListParams>,
) -> AppResult<Json<Vec<MovieSessionListItem>>> {
    let date = params
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_date(d, "date"))
        .transpose()?;
    let movie_id = params
        .movie
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(|m| parse_id(m, "movie"))
        .transpose()?;

    let rows = MovieSessionRepo::list(&state.pool, date, movie_id).await?;
    let media_url = &state.config.media.url;
    Ok(Json(
        rows.iter()
            .map(|row| MovieSessionListItem::build(row, media_url))
            .collect(),
    ))
}

/// GET /api/v1/cinema/movie-sessions/{id}
pub async fn retrieve(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieSessionDetail>> {
    let session = MovieSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MovieSession",
            id,
        }))?;

    let movie = MovieRepo::find_by_id(&state.pool, session.movie_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: session.movie_id,
        }))?;
    let genres = MovieRepo::genres_for_movies(&state.pool, &[movie.id]).await?;
    let actors = MovieRepo::actors_for_movies(&state.pool, &[movie.id]).await?;

    let hall = CinemaHallRepo::find_by_id(&state.pool, session.cinema_hall_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CinemaHall",
            id: session.cinema_hall_id,
        }))?;

    let taken_places = MovieSessionRepo::taken_places(&state.pool, id).await?;

    Ok(Json(MovieSessionDetail {
        id: session.id,
        show_time: session.show_time,
        movie: MovieListItem::build(&movie, &genres, &actors, &state.config.media.url),
        cinema_hall: CinemaHallResponse::from(&hall),
        taken_places,
    }))
}

/// POST /api/v1/cinema/movie-sessions
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateMovieSession>,
) -> AppResult<(StatusCode, Json<MovieSession>)> {
    let session = MovieSessionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        movie_session_id = session.id,
        movie_id = session.movie_id,
        user_id = user.user_id,
        "Movie session created"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// PUT / PATCH /api/v1/cinema/movie-sessions/{id}
///
/// Both verbs apply only the fields present in the body. Moving the session to
/// a hall that cannot hold its sold seats is rejected with 400.
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovieSession>,
) -> AppResult<Json<MovieSession>> {
    let session = match MovieSessionRepo::update(&state.pool, id, &input).await? {
        SessionUpdate::Updated(session) => session,
        SessionUpdate::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "MovieSession",
                id,
            }))
        }
        SessionUpdate::SeatOutsideHall {
            place,
            rows,
            seats_in_row,
        } => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "cinema_hall has {rows} rows of {seats_in_row} seats, \
                 but row {} seat {} is already sold for this session",
                place.row, place.seat
            ))))
        }
    };
    tracing::info!(movie_session_id = id, user_id = user.user_id, "Movie session updated");
    Ok(Json(session))
}

/// DELETE /api/v1/cinema/movie-sessions/{id}
///
/// Tickets sold for the session are removed with it.
pub async fn delete(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MovieSessionRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(movie_session_id = id, user_id = user.user_id, "Movie session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MovieSession",
            id,
        }))
    }
}
