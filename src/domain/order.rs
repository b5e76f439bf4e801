use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

/// Fractional digits carried by every currency amount.
pub const CURRENCY_SCALE: i64 = 2;

const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PHONE_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Internal(format!("Unknown order status '{other}'"))),
        }
    }
}

/// Unvalidated purchase request as it arrives at the boundary.
///
/// Numeric fields are kept as text so that `"2"` and `2` are accepted alike.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub phone_id: Option<String>,
    pub quantity: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
}

/// A purchase request that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub phone_id: i64,
    pub quantity: i32,
    pub customer: CustomerDetails,
}

impl OrderDraft {
    pub fn validate(self) -> Result<PlacementRequest, DomainError> {
        let required = |v: Option<String>| -> Result<String, DomainError> {
            match v.map(|s| s.trim().to_string()) {
                Some(s) if !s.is_empty() => Ok(s),
                _ => Err(DomainError::Validation("All fields are required".to_string())),
            }
        };

        let phone_id = required(self.phone_id)?;
        let name = required(self.customer_name)?;
        let email = required(self.customer_email)?;
        let phone = required(self.customer_phone)?;
        let shipping_address = required(self.shipping_address)?;

        let phone_id = phone_id
            .parse::<i64>()
            .map_err(|_| DomainError::Validation(format!("Invalid phone_id '{phone_id}'")))?;
        // Ids start at 1; a zero id is treated as absent.
        if phone_id == 0 {
            return Err(DomainError::Validation("All fields are required".to_string()));
        }

        let quantity = match self.quantity.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(q) => q.parse::<i32>().ok().filter(|q| *q > 0).ok_or_else(|| {
                DomainError::Validation("Quantity must be a positive integer".to_string())
            })?,
        };

        check_len("customer_name", &name, MAX_NAME_LEN)?;
        check_len("customer_email", &email, MAX_EMAIL_LEN)?;
        check_len("customer_phone", &phone, MAX_PHONE_LEN)?;

        Ok(PlacementRequest {
            phone_id,
            quantity,
            customer: CustomerDetails {
                name,
                email,
                phone,
                shipping_address,
            },
        })
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Exact `price × quantity`, normalized to two fractional digits with
/// round-half-even.
pub fn line_total(price: &BigDecimal, quantity: i32) -> BigDecimal {
    (price * &BigDecimal::from(quantity)).with_scale_round(CURRENCY_SCALE, RoundingMode::HalfEven)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub id: Uuid,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub phone_id: i64,
    pub customer: CustomerDetails,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            phone_id: Some("1".to_string()),
            quantity: Some("2".to_string()),
            customer_name: Some("Juan dela Cruz".to_string()),
            customer_email: Some("juan@example.com".to_string()),
            customer_phone: Some("09171234567".to_string()),
            shipping_address: Some("123 Rizal St, Manila".to_string()),
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn valid_draft_produces_request() {
        let req = draft().validate().expect("draft should validate");
        assert_eq!(req.phone_id, 1);
        assert_eq!(req.quantity, 2);
        assert_eq!(req.customer.email, "juan@example.com");
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let mut d = draft();
        d.quantity = None;
        assert_eq!(d.validate().expect("valid").quantity, 1);
    }

    #[test]
    fn missing_email_is_a_validation_error() {
        let mut d = draft();
        d.customer_email = None;
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut d = draft();
        d.shipping_address = Some("   ".to_string());
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn non_positive_or_garbage_quantity_is_rejected() {
        for q in ["0", "-3", "two", "1.5"] {
            let mut d = draft();
            d.quantity = Some(q.to_string());
            assert!(
                matches!(d.validate(), Err(DomainError::Validation(_))),
                "quantity {q} should be rejected"
            );
        }
    }

    #[test]
    fn zero_phone_id_counts_as_missing() {
        let mut d = draft();
        d.phone_id = Some("0".to_string());
        assert!(matches!(
            d.validate(),
            Err(DomainError::Validation(ref m)) if m == "All fields are required"
        ));
    }

    #[test]
    fn non_numeric_phone_id_is_rejected() {
        let mut d = draft();
        d.phone_id = Some("iphone".to_string());
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn overlong_customer_phone_is_rejected() {
        let mut d = draft();
        d.customer_phone = Some("9".repeat(21));
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn line_total_is_decimal_exact() {
        let total = line_total(&dec("25999.00"), 2);
        assert_eq!(total, dec("51998.00"));
        assert_eq!(total.to_string(), "51998.00");
    }

    #[test]
    fn line_total_uses_bankers_rounding_for_sub_cent_prices() {
        assert_eq!(line_total(&dec("0.125"), 1).to_string(), "0.12");
        assert_eq!(line_total(&dec("0.135"), 1).to_string(), "0.14");
    }

    #[test]
    fn status_round_trips_through_text() {
        let status: OrderStatus = "shipped".parse().expect("known status");
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
