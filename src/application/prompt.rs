//! System prompt assembly for the storefront assistant.

use bigdecimal::{BigDecimal, RoundingMode};

use crate::domain::errors::DomainError;
use crate::domain::order::CURRENCY_SCALE;
use crate::domain::phone::Phone;

pub const STORE_NAME: &str = "Phone Express AI";

const EMPTY_CATALOG: &str = "No phones are currently available in stock.";
const CATALOG_UNAVAILABLE: &str = "Phone database is currently unavailable.";

/// Render a peso amount as `25,999.00`.
pub fn format_php(amount: &BigDecimal) -> String {
    let text = amount
        .with_scale_round(CURRENCY_SCALE, RoundingMode::HalfEven)
        .to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac}")
}

/// One line per phone, or a fallback sentence when the catalog is empty or
/// could not be read.
pub fn catalog_context(phones: Result<&[Phone], &DomainError>) -> String {
    match phones {
        Ok([]) => EMPTY_CATALOG.to_string(),
        Ok(phones) => phones
            .iter()
            .map(|p| {
                format!(
                    "- {} {}: ₱{} ({} in stock) - {}",
                    p.brand,
                    p.model,
                    format_php(&p.price),
                    p.stock,
                    p.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Err(_) => CATALOG_UNAVAILABLE.to_string(),
    }
}

pub fn system_prompt(catalog: &str) -> String {
    format!(
        "You are a phone specialist assistant for {STORE_NAME}. You only help customers with phones.

What you do:
1. Help customers find a phone that fits their needs, budget and preferences
2. Explain phone specifications, features and capabilities
3. Compare phone models and brands
4. Answer questions about prices, availability and ordering
5. Recommend phones for specific requirements such as camera, battery life or performance

Available phones:
{catalog}

Rules:
- Discuss phones and phone-related topics only; steer other questions back to phones
- All prices are in Philippine Peso; always write them like ₱25,999.00
- Be friendly, professional and knowledgeable
- To place an order the customer must give their name, email, phone number, shipping address and the phone they want
- Check stock before confirming an order

The conversation so far is included as chat history."
    )
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn phone(brand: &str, model: &str, price: &str, stock: i32) -> Phone {
        Phone {
            id: 1,
            name: format!("{brand} {model}"),
            brand: brand.to_string(),
            model: model.to_string(),
            price: dec(price),
            description: "Great camera".to_string(),
            stock,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn format_php_groups_thousands() {
        assert_eq!(format_php(&dec("25999")), "25,999.00");
        assert_eq!(format_php(&dec("1234567.5")), "1,234,567.50");
        assert_eq!(format_php(&dec("999.99")), "999.99");
        assert_eq!(format_php(&dec("0")), "0.00");
    }

    #[test]
    fn catalog_context_lists_each_phone() {
        let phones = vec![
            phone("Apple", "iPhone 15", "54990.00", 3),
            phone("Samsung", "Galaxy S24", "49999.00", 1),
        ];
        let ctx = catalog_context(Ok(phones.as_slice()));
        assert_eq!(
            ctx,
            "- Apple iPhone 15: ₱54,990.00 (3 in stock) - Great camera\n\
             - Samsung Galaxy S24: ₱49,999.00 (1 in stock) - Great camera"
        );
    }

    #[test]
    fn catalog_context_fallbacks() {
        let empty: Vec<Phone> = Vec::new();
        assert_eq!(catalog_context(Ok(empty.as_slice())), EMPTY_CATALOG);
        let err = DomainError::Internal("connection refused".to_string());
        assert_eq!(catalog_context(Err(&err)), CATALOG_UNAVAILABLE);
    }

    #[test]
    fn system_prompt_embeds_catalog() {
        let prompt = system_prompt("- Apple iPhone 15: ₱54,990.00 (3 in stock) - x");
        assert!(prompt.contains(STORE_NAME));
        assert!(prompt.contains("Apple iPhone 15"));
    }
}
