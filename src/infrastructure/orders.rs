//! Order persistence. Pure data access: identities are assigned by the
//! database and no business rules are enforced here.

use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderItemView, OrderView};
use crate::infrastructure::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};
use crate::schema::{order_items, orders};

/// Insert an order header inside the caller's transaction and return the
/// database-assigned id.
pub fn insert_order(conn: &mut PgConnection, order: NewOrderRow) -> Result<i32, DomainError> {
    let id = diesel::insert_into(orders::table)
        .values(&order)
        .returning(orders::id)
        .get_result::<i32>(conn)?;
    Ok(id)
}

pub fn insert_order_item(
    conn: &mut PgConnection,
    item: NewOrderItemRow,
) -> Result<(), DomainError> {
    diesel::insert_into(order_items::table)
        .values(&item)
        .execute(conn)?;
    Ok(())
}

/// Fetch an order together with its line items.
pub fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<OrderView>, DomainError> {
    let order = orders::table
        .find(id)
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    let Some(order) = order else {
        return Ok(None);
    };

    let items = order_items::table
        .filter(order_items::order_id.eq(order.id))
        .order(order_items::id.asc())
        .select(OrderItemRow::as_select())
        .load(conn)?;

    Ok(Some(OrderView {
        id: order.id,
        user_id: order.user_id,
        total: order.total,
        status: order.status,
        address: order.address,
        created_at: order.created_at,
        items: items
            .into_iter()
            .map(|i| OrderItemView {
                id: i.id,
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect(),
    }))
}
