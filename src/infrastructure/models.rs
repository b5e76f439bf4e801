use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CustomerDetails, OrderView};
use crate::domain::phone::Phone;
use crate::schema::{orders, phones};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = phones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PhoneRow {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: BigDecimal,
    pub description: String,
    pub stock: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = phones)]
pub struct NewPhoneRow {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: BigDecimal,
    pub description: String,
    pub stock: i32,
    pub is_available: bool,
}

impl From<PhoneRow> for Phone {
    fn from(row: PhoneRow) -> Self {
        Phone {
            id: row.id,
            name: row.name,
            brand: row.brand,
            model: row.model,
            price: row.price,
            description: row.description,
            stock: row.stock,
            is_available: row.is_available,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(PhoneRow, foreign_key = phone_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub phone_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub phone_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: String,
}

impl TryFrom<OrderRow> for OrderView {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(OrderView {
            id: row.id,
            phone_id: row.phone_id,
            customer: CustomerDetails {
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
                shipping_address: row.shipping_address,
            },
            quantity: row.quantity,
            total_price: row.total_price,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}
