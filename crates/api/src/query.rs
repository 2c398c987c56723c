//! Shared query parameter types for API handlers.
//!
//! Raw values are kept as strings here and parsed with the
//! `cinema_core::filters` helpers, so malformed input becomes a 400 with a
//! readable message instead of a generic query rejection.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `clamp_limit` / `clamp_offset` before they reach
/// the repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /cinema/movies`.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Comma-separated genre ids.
    pub genres: Option<String>,
    /// Comma-separated actor ids.
    pub actors: Option<String>,
}

/// Query parameters for `GET /cinema/movie-sessions`.
#[derive(Debug, Default, Deserialize)]
pub struct MovieSessionListParams {
    /// Calendar day (`YYYY-MM-DD`) of the show time.
    pub date: Option<String>,
    /// Movie id.
    pub movie: Option<String>,
}
