use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use super::money_to_f64;
use crate::application::CheckoutService;
use crate::auth::AuthenticatedUser;
use crate::domain::order::OrderView;
use crate::errors::AppError;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub total: f64,
    pub status: String,
    pub address: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    fn try_from_domain(order: OrderView) -> Result<Self, AppError> {
        Ok(Self {
            id: order.id,
            total: money_to_f64(&order.total)?,
            status: order.status,
            address: order.address,
            created_at: order.created_at.to_rfc3339(),
            items: order
                .items
                .into_iter()
                .map(|i| {
                    Ok(OrderItemResponse {
                        id: i.id,
                        product_id: i.product_id,
                        quantity: i.quantity,
                        unit_price: money_to_f64(&i.unit_price)?,
                    })
                })
                .collect::<Result<Vec<_>, AppError>>()?,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/v1/orders/{id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<CheckoutService>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();

    let order = web::block(move || service.find_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    // Orders are visible to their owner only; anything else reads as absent.
    let order = order
        .filter(|o| o.user_id == user.0)
        .ok_or_else(|| AppError::NotFound("order not found".to_string()))?;

    Ok(HttpResponse::Ok().json(OrderResponse::try_from_domain(order)?))
}
