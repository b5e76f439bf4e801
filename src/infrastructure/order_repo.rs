use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    line_total, ListResult, OrderStatus, OrderView, PlacedOrder, PlacementRequest,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{orders, phones};

use super::models::{NewOrderRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Decide why a conditional decrement matched no row.
fn rejection(conn: &mut PgConnection, phone_id: i64) -> Result<DomainError, DomainError> {
    let current: Option<(bool, i32)> = phones::table
        .filter(phones::id.eq(phone_id))
        .select((phones::is_available, phones::stock))
        .first(conn)
        .optional()?;

    Ok(match current {
        Some((true, stock)) => DomainError::InsufficientStock { available: stock },
        _ => DomainError::NotFound("Phone not found or not available".to_string()),
    })
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, request: &PlacementRequest) -> Result<PlacedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Reserve stock with a single conditional UPDATE. The row lock
            //    serializes placements on the same phone and Postgres re-checks
            //    the WHERE clause after waiting on it. SET sees pre-update
            //    values, so `stock > quantity` is "stock left after this order".
            let price: Option<BigDecimal> = diesel::update(
                phones::table
                    .filter(phones::id.eq(request.phone_id))
                    .filter(phones::is_available.eq(true))
                    .filter(phones::stock.ge(request.quantity)),
            )
            .set((
                phones::stock.eq(phones::stock - request.quantity),
                phones::is_available.eq(phones::stock.gt(request.quantity)),
                phones::updated_at.eq(Utc::now()),
            ))
            .returning(phones::price)
            .get_result(conn)
            .optional()?;

            let Some(price) = price else {
                return Err(rejection(conn, request.phone_id)?);
            };

            // 2. Record the order at the price read under the row lock.
            let order_id = Uuid::new_v4();
            let total_price = line_total(&price, request.quantity);
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    phone_id: request.phone_id,
                    customer_name: request.customer.name.clone(),
                    customer_email: request.customer.email.clone(),
                    customer_phone: request.customer.phone.clone(),
                    shipping_address: request.customer.shipping_address.clone(),
                    quantity: request.quantity,
                    total_price: total_price.clone(),
                    status: OrderStatus::Pending.as_str().to_string(),
                })
                .execute(conn)?;

            Ok(PlacedOrder {
                id: order_id,
                total_price,
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        order.map(OrderView::try_from).transpose()
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1).max(0).saturating_mul(limit);
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .then_order_by(orders::id.desc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(OrderView::try_from)
                    .collect::<Result<_, _>>()?,
                total,
            })
        })
    }
}
