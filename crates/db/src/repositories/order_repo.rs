//! Repository for the `orders` and `tickets` tables.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{CreateTicket, Order, Ticket};

/// Column list for the `orders` table.
const COLUMNS: &str = "id, user_id, created_at, updated_at";

/// Column list for the `tickets` table.
const TICKET_COLUMNS: &str =
    "id, movie_session_id, order_id, \"row\", seat, created_at, updated_at";

/// Provides create and list operations for orders and their tickets.
pub struct OrderRepo;

impl OrderRepo {
    /// Create an order with its tickets in one transaction.
    ///
    /// A seat already sold for the session violates
    /// `uq_tickets_session_row_seat` and rolls back the whole order.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        tickets: &[CreateTicket],
    ) -> Result<(Order, Vec<Ticket>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let order_query = format!("INSERT INTO orders (user_id) VALUES ($1) RETURNING {COLUMNS}");
        let order = sqlx::query_as::<_, Order>(&order_query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let ticket_query = format!(
            "INSERT INTO tickets (movie_session_id, order_id, \"row\", seat)
             VALUES ($1, $2, $3, $4)
             RETURNING {TICKET_COLUMNS}"
        );
        let mut created = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let row = sqlx::query_as::<_, Ticket>(&ticket_query)
                .bind(ticket.movie_session)
                .bind(order.id)
                .bind(ticket.row)
                .bind(ticket.seat)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok((order, created))
    }

    /// A page of the user's orders, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Tickets belonging to any of `order_ids`, ordered by ID.
    pub async fn tickets_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query =
            format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE order_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(order_ids)
            .fetch_all(pool)
            .await
    }
}
