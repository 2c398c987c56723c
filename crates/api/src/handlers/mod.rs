//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `cinema_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod actor;
pub mod auth;
pub mod cinema_hall;
pub mod genre;
pub mod movie;
pub mod movie_session;
pub mod order;
