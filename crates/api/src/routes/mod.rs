pub mod auth;
pub mod cinema;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /cinema/genres                                   list, create (staff)
/// /cinema/actors                                   list, create (staff)
/// /cinema/cinema-halls                             list, create (staff)
/// /cinema/movies                                   list, create (staff)
/// /cinema/movies/{id}                              retrieve
/// /cinema/movies/{id}/upload-image                 upload image (staff)
/// /cinema/movie-sessions                           list, create (staff)
/// /cinema/movie-sessions/{id}                      retrieve, update, delete (staff)
/// /cinema/orders                                   list own, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, me).
        .nest("/auth", auth::router())
        // Catalog, schedule and booking.
        .nest("/cinema", cinema::router())
}
