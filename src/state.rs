use std::sync::Arc;

use crate::application::catalog_service::CatalogService;
use crate::application::chat_service::ChatService;
use crate::application::order_service::OrderService;
use crate::db::DbPool;
use crate::domain::ports::{ChatGateway, OrderRepository, PhoneRepository};
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::phone_repo::DieselPhoneRepository;

pub type SharedPhones = Arc<dyn PhoneRepository>;
pub type SharedOrders = Arc<dyn OrderRepository>;
pub type SharedGateway = Arc<dyn ChatGateway>;

/// Services shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService<SharedPhones>,
    pub orders: OrderService<SharedOrders>,
    pub chat: ChatService<SharedPhones, SharedGateway>,
}

impl AppState {
    pub fn new(phones: SharedPhones, orders: SharedOrders, gateway: SharedGateway) -> Self {
        Self {
            catalog: CatalogService::new(phones.clone()),
            orders: OrderService::new(orders),
            chat: ChatService::new(phones, gateway),
        }
    }

    /// Postgres-backed state.
    pub fn with_pool(pool: DbPool, gateway: SharedGateway) -> Self {
        Self::new(
            Arc::new(DieselPhoneRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool)),
            gateway,
        )
    }
}
