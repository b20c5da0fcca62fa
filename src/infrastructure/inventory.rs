//! The inventory ledger: the only code allowed to mutate product stock.
//!
//! Both functions operate on a connection with an open transaction; callers
//! own commit and rollback. Locks must be taken in ascending product-id order
//! so that overlapping checkouts cannot deadlock.

use diesel::prelude::*;

use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::infrastructure::models::ProductRow;
use crate::schema::products;

/// Lock a product row `FOR UPDATE` for the remainder of the enclosing
/// transaction. Returns `None` when no such product exists.
pub fn lock_product(
    conn: &mut PgConnection,
    product_id: i32,
) -> Result<Option<Product>, DomainError> {
    let row = products::table
        .find(product_id)
        .select(ProductRow::as_select())
        .for_update()
        .first::<ProductRow>(conn)
        .optional()?;
    Ok(row.map(Product::from))
}

/// Atomically decrement a product's stock and return the new quantity.
///
/// The row is read `FOR UPDATE`, decremented, and read back. A post-update
/// quantity that differs from the expected one means another writer slipped
/// past the row lock; the transaction must not commit in that case.
pub fn reserve_stock(
    conn: &mut PgConnection,
    product_id: i32,
    quantity: i32,
) -> Result<i32, DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidQuantity);
    }

    let before = products::table
        .find(product_id)
        .select(ProductRow::as_select())
        .for_update()
        .first::<ProductRow>(conn)
        .optional()?
        .ok_or(DomainError::ProductNotFound(product_id))?;

    if before.quantity < quantity {
        return Err(DomainError::InsufficientStock {
            name: before.name,
            available: before.quantity,
        });
    }

    let affected = diesel::update(products::table.find(product_id))
        .set(products::quantity.eq(products::quantity - quantity))
        .execute(conn)?;
    if affected == 0 {
        return Err(DomainError::ReservationFailed {
            product_id,
            reason: "no rows updated".to_string(),
        });
    }

    let after: i32 = products::table
        .find(product_id)
        .select(products::quantity)
        .first(conn)?;

    let expected = before.quantity - quantity;
    if after != expected {
        return Err(DomainError::Concurrency {
            product_id,
            expected,
            found: after,
        });
    }

    Ok(after)
}
