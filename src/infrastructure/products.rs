//! Catalog queries. Stock mutation lives in [`crate::infrastructure::inventory`].

use diesel::prelude::*;

use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::infrastructure::models::{NewProductRow, ProductRow};
use crate::schema::products;

pub fn list(conn: &mut PgConnection) -> Result<Vec<Product>, DomainError> {
    let rows = products::table
        .order(products::id.asc())
        .select(ProductRow::as_select())
        .load::<ProductRow>(conn)?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Product>, DomainError> {
    let row = products::table
        .find(id)
        .select(ProductRow::as_select())
        .first::<ProductRow>(conn)
        .optional()?;
    Ok(row.map(Product::from))
}

pub fn insert(conn: &mut PgConnection, product: NewProductRow) -> Result<i32, DomainError> {
    let id = diesel::insert_into(products::table)
        .values(&product)
        .returning(products::id)
        .get_result::<i32>(conn)?;
    Ok(id)
}
