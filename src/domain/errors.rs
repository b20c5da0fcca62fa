use thiserror::Error;

/// Every way a request can fail below the HTTP layer.
///
/// The checkout variants are deliberately exhaustive: the orchestrator never
/// inspects error strings, and the HTTP layer maps each variant to a status
/// code without further parsing.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user identity is missing")]
    MissingIdentity,

    #[error("cart is empty")]
    EmptyCart,

    #[error("item quantity must be a positive integer")]
    InvalidQuantity,

    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("product {name} is out of stock")]
    OutOfStock { name: String },

    #[error("product {name} has only {available} items left")]
    InsufficientStock { name: String, available: i32 },

    #[error("could not reserve stock for product {product_id}: {reason}")]
    ReservationFailed { product_id: i32, reason: String },

    #[error(
        "concurrent update detected for product {product_id}: expected quantity {expected}, found {found}"
    )]
    Concurrency {
        product_id: i32,
        expected: i32,
        found: i32,
    },

    #[error("checkout timed out")]
    Timeout,

    #[error("user with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}
