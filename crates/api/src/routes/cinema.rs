//! Route definitions for the `/cinema` resources.
//!
//! Every route requires authentication; mutations additionally require the
//! staff role, except placing orders.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{actor, cinema_hall, genre, movie, movie_session, order};
use crate::state::AppState;

/// Routes mounted at `/cinema`.
///
/// ```text
/// GET    /genres                      -> genre::list
/// POST   /genres                      -> genre::create
/// GET    /actors                      -> actor::list
/// POST   /actors                      -> actor::create
/// GET    /cinema-halls                -> cinema_hall::list
/// POST   /cinema-halls                -> cinema_hall::create
///
/// GET    /movies                      -> movie::list
/// POST   /movies                      -> movie::create
/// GET    /movies/{id}                 -> movie::retrieve
/// POST   /movies/{id}/upload-image    -> movie::upload_image
///
/// GET    /movie-sessions              -> movie_session::list
/// POST   /movie-sessions              -> movie_session::create
/// GET    /movie-sessions/{id}         -> movie_session::retrieve
/// PUT    /movie-sessions/{id}         -> movie_session::update
/// PATCH  /movie-sessions/{id}         -> movie_session::update
/// DELETE /movie-sessions/{id}         -> movie_session::delete
///
/// GET    /orders                      -> order::list
/// POST   /orders                      -> order::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(genre::list).post(genre::create))
        .route("/actors", get(actor::list).post(actor::create))
        .route(
            "/cinema-halls",
            get(cinema_hall::list).post(cinema_hall::create),
        )
        .route("/movies", get(movie::list).post(movie::create))
        // Read-only detail: PUT/PATCH/DELETE answer 405.
        .route("/movies/{id}", get(movie::retrieve))
        .route("/movies/{id}/upload-image", post(movie::upload_image))
        .route(
            "/movie-sessions",
            get(movie_session::list).post(movie_session::create),
        )
        .route(
            "/movie-sessions/{id}",
            get(movie_session::retrieve)
                .put(movie_session::update)
                .patch(movie_session::update)
                .delete(movie_session::delete),
        )
        .route("/orders", get(order::list).post(order::create))
}
