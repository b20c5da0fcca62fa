use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;
use crate::domain::user::User;
use crate::infrastructure::models::{NewUserRow, UserRow};
use crate::schema::users;

/// Insert a user and return the database-assigned id. A unique violation on
/// the email column surfaces as [`DomainError::EmailTaken`].
pub fn insert(conn: &mut PgConnection, user: NewUserRow) -> Result<i32, DomainError> {
    match diesel::insert_into(users::table)
        .values(&user)
        .returning(users::id)
        .get_result::<i32>(conn)
    {
        Ok(id) => Ok(id),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(DomainError::EmailTaken)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, DomainError> {
    let row = users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()?;
    Ok(row.map(User::from))
}

pub fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<User>, DomainError> {
    let row = users::table
        .find(id)
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()?;
    Ok(row.map(User::from))
}
