use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderDraft, OrderView, PlacedOrder};
use crate::domain::ports::OrderRepository;

#[derive(Clone)]
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate the draft, then reserve stock and record the order.
    ///
    /// Validation failures never reach the repository. No retry is attempted
    /// on any failure.
    pub fn place_order(&self, draft: OrderDraft) -> Result<PlacedOrder, DomainError> {
        let request = draft.validate()?;

        match self.repo.place(&request) {
            Ok(order) => {
                log::info!(
                    "Placed order {} for phone {} (quantity {}, total {})",
                    order.id,
                    request.phone_id,
                    request.quantity,
                    order.total_price
                );
                Ok(order)
            }
            Err(e) => {
                log::warn!(
                    "Order for phone {} (quantity {}) rejected: {}",
                    request.phone_id,
                    request.quantity,
                    e
                );
                Err(e)
            }
        }
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.repo.list(page, limit)
    }
}
