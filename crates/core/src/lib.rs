//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here touches the network or the database: ids, errors,
//! role names, query-parameter parsing, seat validation and media helpers.

pub mod error;
pub mod filters;
pub mod media;
pub mod pagination;
pub mod roles;
pub mod seating;
pub mod types;
