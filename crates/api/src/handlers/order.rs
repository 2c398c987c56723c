//! Handlers for the `/cinema/orders` resource.
//!
//! Every authenticated user can place orders and see their own order
//! history. Seat double-booking is caught by `uq_tickets_session_row_seat`
//! and surfaces as 409.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::pagination::{clamp_limit, clamp_offset, DEFAULT_ORDER_LIMIT, MAX_ORDER_LIMIT};
use cinema_core::seating::{ensure_distinct_seats, validate_seat, SeatRequest};
use cinema_core::types::DbId;
use cinema_db::models::movie_session::MovieSessionListItem;
use cinema_db::models::order::{CreateOrder, Order, OrderResponse, Ticket, TicketResponse};
use cinema_db::repositories::{MovieSessionRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/cinema/orders
///
/// The caller's orders, newest first. `?limit=` defaults to 10 (max 100).
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let limit = clamp_limit(params.limit, DEFAULT_ORDER_LIMIT, MAX_ORDER_LIMIT);
    let offset = clamp_offset(params.offset);

    let orders = OrderRepo::list_for_user(&state.pool, user.user_id, limit, offset).await?;
    let order_ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
    let tickets = OrderRepo::tickets_for_orders(&state.pool, &order_ids).await?;

    let responses = build_responses(&state, &orders, &tickets).await?;
    Ok(Json(responses))
}

/// POST /api/v1/cinema/orders
///
/// Every ticket must name an existing session and a seat inside that
/// session's hall. The order and all its tickets are stored atomically.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    if input.tickets.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "An order must contain at least one ticket".into(),
        )));
    }

    let seats: Vec<SeatRequest> = input.tickets.iter().map(SeatRequest::from).collect();
    ensure_distinct_seats(&seats)?;

    let session_ids = distinct_session_ids(seats.iter().map(|s| s.movie_session_id));
    let seating: HashMap<DbId, (i32, i32)> =
        MovieSessionRepo::seating_for_sessions(&state.pool, &session_ids)
            .await?
            .into_iter()
            .map(|s| (s.movie_session_id, (s.rows, s.seats_in_row)))
            .collect();

    for seat in &seats {
        let (rows, seats_in_row) = seating.get(&seat.movie_session_id).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "movie_session {} does not exist",
                seat.movie_session_id
            ))
        })?;
        validate_seat(seat.row, seat.seat, rows, seats_in_row)?;
    }

    let (order, tickets) = OrderRepo::create(&state.pool, user.user_id, &input.tickets).await?;
    tracing::info!(
        order_id = order.id,
        user_id = user.user_id,
        tickets = tickets.len(),
        "Order created"
    );

    let mut responses = build_responses(&state, std::slice::from_ref(&order), &tickets).await?;
    let response = responses
        .pop()
        .ok_or_else(|| AppError::InternalError("Created order missing from response".into()))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Attach tickets (with their session list shapes) to each order,
/// preserving the order of `orders`.
async fn build_responses(
    state: &AppState,
    orders: &[Order],
    tickets: &[Ticket],
) -> AppResult<Vec<OrderResponse>> {
    let session_ids = distinct_session_ids(tickets.iter().map(|t| t.movie_session_id));
    let media_url = &state.config.media.url;
    let sessions: HashMap<DbId, MovieSessionListItem> =
        MovieSessionRepo::rows_by_ids(&state.pool, &session_ids)
            .await?
            .iter()
            .map(|row| (row.id, MovieSessionListItem::build(row, media_url)))
            .collect();

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let mut order_tickets = Vec::new();
        for ticket in tickets.iter().filter(|t| t.order_id == order.id) {
            let movie_session = sessions
                .get(&ticket.movie_session_id)
                .cloned()
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "MovieSession",
                    id: ticket.movie_session_id,
                }))?;
            order_tickets.push(TicketResponse {
                id: ticket.id,
                row: ticket.row,
                seat: ticket.seat,
                movie_session,
            });
        }
        responses.push(OrderResponse {
            id: order.id,
            created_at: order.created_at,
            tickets: order_tickets,
        });
    }
    Ok(responses)
}

fn distinct_session_ids(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut out: Vec<DbId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
