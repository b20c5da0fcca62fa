pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use bigdecimal::{BigDecimal, ToPrimitive};

use crate::errors::AppError;

/// Prices travel as JSON numbers on the wire.
pub(crate) fn money_to_f64(value: &BigDecimal) -> Result<f64, AppError> {
    value
        .to_f64()
        .ok_or_else(|| AppError::Internal("decimal value out of f64 range".to_string()))
}
