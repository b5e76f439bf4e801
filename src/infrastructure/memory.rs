//! Process-local catalog and order storage.
//!
//! Each phone sits behind its own mutex, so placements against one phone are
//! serialized while placements against different phones proceed in parallel.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    line_total, ListResult, OrderStatus, OrderView, PlacedOrder, PlacementRequest,
};
use crate::domain::phone::Phone;
use crate::domain::ports::{OrderRepository, PhoneRepository};

#[derive(Debug, Clone)]
pub struct NewPhone {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: BigDecimal,
    pub description: String,
    pub stock: i32,
    pub is_available: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    phones: RwLock<BTreeMap<i64, Arc<Mutex<Phone>>>>,
    orders: Mutex<Vec<OrderView>>,
    last_phone_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog entry. A phone without stock is always stored as
    /// unavailable.
    pub fn add_phone(&self, new: NewPhone) -> Phone {
        let id = self.last_phone_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stock = new.stock.max(0);
        let phone = Phone {
            id,
            name: new.name,
            brand: new.brand,
            model: new.model,
            price: new.price,
            description: new.description,
            stock,
            is_available: new.is_available && stock > 0,
            created_at: Utc::now(),
        };
        self.phones
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(phone.clone())));
        phone
    }

    fn slot(&self, id: i64) -> Option<Arc<Mutex<Phone>>> {
        self.phones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

impl PhoneRepository for InMemoryStore {
    fn list_available(&self) -> Result<Vec<Phone>, DomainError> {
        let phones = self.phones.read().unwrap_or_else(PoisonError::into_inner);
        Ok(phones
            .values()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .filter(Phone::is_listed)
            .collect())
    }

    fn find(&self, id: i64) -> Result<Option<Phone>, DomainError> {
        Ok(self
            .slot(id)
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).clone()))
    }
}

impl OrderRepository for InMemoryStore {
    fn place(&self, request: &PlacementRequest) -> Result<PlacedOrder, DomainError> {
        let not_found = || DomainError::NotFound("Phone not found or not available".to_string());

        let slot = self.slot(request.phone_id).ok_or_else(not_found)?;
        // Held until both the order and the decrement are written.
        let mut phone = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if !phone.is_available {
            return Err(not_found());
        }
        if phone.stock < request.quantity {
            return Err(DomainError::InsufficientStock {
                available: phone.stock,
            });
        }

        let order = OrderView {
            id: Uuid::new_v4(),
            phone_id: phone.id,
            customer: request.customer.clone(),
            quantity: request.quantity,
            total_price: line_total(&phone.price, request.quantity),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        let placed = PlacedOrder {
            id: order.id,
            total_price: order.total_price.clone(),
        };

        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order);
        phone.stock -= request.quantity;
        if phone.stock == 0 {
            phone.is_available = false;
        }

        Ok(placed)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let offset = (page - 1).max(0).saturating_mul(limit);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(ListResult {
            items: orders.iter().rev().skip(offset).take(limit).cloned().collect(),
            total: orders.len() as i64,
        })
    }
}
