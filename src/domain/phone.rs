use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// A catalog entry.
///
/// `is_available` is always false when `stock == 0`; it may also be false
/// for a phone that still has stock but was delisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Phone {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: BigDecimal,
    pub description: String,
    pub stock: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Phone {
    /// Whether the phone may be shown in the catalog and ordered.
    pub fn is_listed(&self) -> bool {
        self.is_available && self.stock > 0
    }
}
