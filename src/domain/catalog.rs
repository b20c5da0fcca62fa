use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// A catalog product. `quantity` is the authoritative stock count and is only
/// ever mutated through the inventory ledger.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: BigDecimal,
    pub quantity: i32,
}
