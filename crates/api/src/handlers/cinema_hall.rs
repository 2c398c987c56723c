//! Handlers for the `/cinema/cinema-halls` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::seating::validate_hall_dimensions;
use cinema_db::models::cinema_hall::{CinemaHallResponse, CreateCinemaHall};
use cinema_db::repositories::CinemaHallRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/cinema/cinema-halls
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CinemaHallResponse>>> {
    let halls = CinemaHallRepo::list(&state.pool).await?;
    Ok(Json(halls.iter().map(CinemaHallResponse::from).collect()))
}

/// POST /api/v1/cinema/cinema-halls
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCinemaHall>,
) -> AppResult<(StatusCode, Json<CinemaHallResponse>)> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".into(),
        )));
    }
    validate_hall_dimensions(input.rows, input.seats_in_row)?;

    let hall = CinemaHallRepo::create(&state.pool, &input).await?;
    tracing::info!(cinema_hall_id = hall.id, user_id = user.user_id, "Cinema hall created");
    Ok((StatusCode::CREATED, Json(CinemaHallResponse::from(&hall))))
}
