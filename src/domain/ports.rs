use async_trait::async_trait;
use uuid::Uuid;

use super::chat::ChatMessage;
use super::errors::DomainError;
use super::order::{ListResult, OrderView, PlacedOrder, PlacementRequest};
use super::phone::Phone;

pub trait PhoneRepository: Send + Sync + 'static {
    /// Phones with `is_available` set and stock left, ordered by id.
    fn list_available(&self) -> Result<Vec<Phone>, DomainError>;
    fn find(&self, id: i64) -> Result<Option<Phone>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Reserve stock and record the order as one atomic step.
    ///
    /// Implementations must never leave an order without its stock decrement
    /// or a decrement without its order, and must serialize concurrent
    /// placements against the same phone.
    fn place(&self, request: &PlacementRequest) -> Result<PlacedOrder, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
}

/// The external text-generation service.
#[async_trait]
pub trait ChatGateway: Send + Sync + 'static {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, DomainError>;
}

impl<T: PhoneRepository + ?Sized> PhoneRepository for std::sync::Arc<T> {
    fn list_available(&self) -> Result<Vec<Phone>, DomainError> {
        (**self).list_available()
    }

    fn find(&self, id: i64) -> Result<Option<Phone>, DomainError> {
        (**self).find(id)
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for std::sync::Arc<T> {
    fn place(&self, request: &PlacementRequest) -> Result<PlacedOrder, DomainError> {
        (**self).place(request)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        (**self).list(page, limit)
    }
}

#[async_trait]
impl<T: ChatGateway + ?Sized> ChatGateway for std::sync::Arc<T> {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, DomainError> {
        (**self).complete(messages).await
    }
}
