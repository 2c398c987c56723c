//! Cinema hall seating rules.
//!
//! A hall is a `rows x seats_in_row` grid numbered from 1. A ticket names one
//! cell of that grid for one movie session.

use crate::error::CoreError;
use crate::types::DbId;

/// Total number of seats in a hall.
pub fn capacity(rows: i32, seats_in_row: i32) -> i32 {
    rows.saturating_mul(seats_in_row)
}

/// Seats still free for a session, never negative.
pub fn tickets_available(rows: i32, seats_in_row: i32, tickets_sold: i64) -> i64 {
    (i64::from(capacity(rows, seats_in_row)) - tickets_sold).max(0)
}

/// Validate hall dimensions on create.
pub fn validate_hall_dimensions(rows: i32, seats_in_row: i32) -> Result<(), CoreError> {
    if rows < 1 {
        return Err(CoreError::Validation(format!(
            "rows must be at least 1, got {rows}"
        )));
    }
    if seats_in_row < 1 {
        return Err(CoreError::Validation(format!(
            "seats_in_row must be at least 1, got {seats_in_row}"
        )));
    }
    Ok(())
}

/// Validate that `(row, seat)` lies inside a hall of the given dimensions.
pub fn validate_seat(row: i32, seat: i32, rows: i32, seats_in_row: i32) -> Result<(), CoreError> {
    if !(1..=rows).contains(&row) {
        return Err(CoreError::Validation(format!(
            "row must be in available range (1, {rows}), got {row}"
        )));
    }
    if !(1..=seats_in_row).contains(&seat) {
        return Err(CoreError::Validation(format!(
            "seat must be in available range (1, {seats_in_row}), got {seat}"
        )));
    }
    Ok(())
}

/// A requested seat for a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatRequest {
    pub movie_session_id: DbId,
    pub row: i32,
    pub seat: i32,
}

/// Reject an order that asks for the same seat twice.
pub fn ensure_distinct_seats(seats: &[SeatRequest]) -> Result<(), CoreError> {
    for (i, a) in seats.iter().enumerate() {
        if seats[..i].contains(a) {
            return Err(CoreError::Validation(format!(
                "seat (row {}, seat {}) for movie session {} is requested more than once",
                a.row, a.seat, a.movie_session_id
            )));
        }
    }
    Ok(())
}
