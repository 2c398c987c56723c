//! Order and ticket models, DTOs and response shapes.

use cinema_core::seating::SeatRequest;
use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::movie_session::MovieSessionListItem;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: DbId,
    pub movie_session_id: DbId,
    pub order_id: DbId,
    pub row: i32,
    pub seat: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One requested seat inside [`CreateOrder`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateTicket {
    pub row: i32,
    pub seat: i32,
    pub movie_session: DbId,
}

impl From<&CreateTicket> for SeatRequest {
    fn from(ticket: &CreateTicket) -> Self {
        SeatRequest {
            movie_session_id: ticket.movie_session,
            row: ticket.row,
            seat: ticket.seat,
        }
    }
}

/// DTO for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub tickets: Vec<CreateTicket>,
}

/// Ticket as nested in [`OrderResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: DbId,
    pub row: i32,
    pub seat: i32,
    pub movie_session: MovieSessionListItem,
}

/// Order with its tickets.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: DbId,
    pub created_at: Timestamp,
    pub tickets: Vec<TicketResponse>,
}
