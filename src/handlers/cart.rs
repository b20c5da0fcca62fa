use std::time::Duration;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money_to_f64;
use crate::application::CheckoutService;
use crate::auth::AuthenticatedUser;
use crate::domain::errors::DomainError;
use crate::domain::order::CartItem;
use crate::errors::AppError;

/// Upper bound for one checkout, lock waits included. On expiry the blocked
/// transaction is dropped and rolls back.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartCheckoutRequest {
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub id: i32,
    pub total: f64,
    pub message: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/v1/cart/checkout
#[utoipa::path(
    post,
    path = "/api/v1/cart/checkout",
    request_body = CartCheckoutRequest,
    responses(
        (status = 200, description = "Order created successfully", body = CheckoutResponse),
        (status = 400, description = "Empty cart or not enough stock"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "A cart line references an unknown product"),
        (status = 504, description = "Checkout timed out"),
    ),
    tag = "cart"
)]
pub async fn checkout(
    service: web::Data<CheckoutService>,
    user: AuthenticatedUser,
    body: web::Json<CartCheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let items: Vec<CartItem> = body
        .into_inner()
        .items
        .into_iter()
        .map(|i| CartItem {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();

    let service = service.into_inner();
    let user_id = user.0;
    let receipt = tokio::time::timeout(
        CHECKOUT_TIMEOUT,
        web::block(move || service.checkout(Some(user_id), &items)),
    )
    .await
    .map_err(|_| AppError::from(DomainError::Timeout))?
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        id: receipt.order_id,
        total: money_to_f64(&receipt.total)?,
        message: "Order created successfully".to_string(),
    }))
}
