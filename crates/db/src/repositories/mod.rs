//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod cinema_hall_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod movie_session_repo;
pub mod order_repo;
pub mod role_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use cinema_hall_repo::CinemaHallRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use movie_session_repo::MovieSessionRepo;
pub use order_repo::OrderRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
