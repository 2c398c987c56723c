//! Handlers for the `/cinema/actors` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_db::models::actor::{Actor, CreateActor};
use cinema_db::repositories::ActorRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// Actor as returned by the API, with the derived `full_name`.
#[derive(Debug, Serialize)]
pub struct ActorResponse {
    #[serde(flatten)]
    pub actor: Actor,
    pub full_name: String,
}

impl From<Actor> for ActorResponse {
    fn from(actor: Actor) -> Self {
        let full_name = actor.full_name();
        Self { actor, full_name }
    }
}

/// GET /api/v1/cinema/actors
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActorResponse>>> {
    let actors = ActorRepo::list(&state.pool).await?;
    Ok(Json(actors.into_iter().map(ActorResponse::from).collect()))
}

/// POST /api/v1/cinema/actors
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateActor>,
) -> AppResult<(StatusCode, Json<ActorResponse>)> {
    input.first_name = input.first_name.trim().to_string();
    input.last_name = input.last_name.trim().to_string();
    if input.first_name.is_empty() || input.last_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "first_name and last_name must not be blank".into(),
        )));
    }

    let actor = ActorRepo::create(&state.pool, &input).await?;
    tracing::info!(actor_id = actor.id, user_id = user.user_id, "Actor created");
    Ok((StatusCode::CREATED, Json(actor.into())))
}
