use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// One line of a cart as submitted by the caller. Never persisted.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: i32,
    pub quantity: i32,
}

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order_id: i32,
    pub total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub user_id: i32,
    pub total: BigDecimal,
    pub status: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}
