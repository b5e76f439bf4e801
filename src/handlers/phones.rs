use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::phone::Phone;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PhoneResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Price in PHP with two decimals, e.g. "25999.00"
    pub price: String,
    pub description: String,
    pub stock: i32,
    pub is_available: bool,
}

impl From<Phone> for PhoneResponse {
    fn from(p: Phone) -> Self {
        Self {
            id: p.id,
            name: p.name,
            brand: p.brand,
            model: p.model,
            price: p.price.to_string(),
            description: p.description,
            stock: p.stock,
            is_available: p.is_available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhoneListResponse {
    pub phones: Vec<PhoneResponse>,
}

/// GET /phones
///
/// Phones that are available and in stock, in id order.
#[utoipa::path(
    get,
    path = "/phones",
    responses(
        (status = 200, description = "Available phones", body = PhoneListResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "phones"
)]
pub async fn list_phones(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let catalog = state.catalog.clone();

    let phones = web::block(move || catalog.list_available())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PhoneListResponse {
        phones: phones.into_iter().map(PhoneResponse::from).collect(),
    }))
}

/// GET /phones/{id}
#[utoipa::path(
    get,
    path = "/phones/{id}",
    params(
        ("id" = i64, Path, description = "Phone id"),
    ),
    responses(
        (status = 200, description = "Phone found", body = PhoneResponse),
        (status = 404, description = "Phone not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "phones"
)]
pub async fn get_phone(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let catalog = state.catalog.clone();

    let phone = web::block(move || catalog.get_phone(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PhoneResponse::from(phone)))
}
