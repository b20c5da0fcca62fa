use crate::auth::{passwords, tokens};
use crate::config::JwtConfig;
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::user::{Signup, User};
use crate::infrastructure::models::NewUserRow;
use crate::infrastructure::users;

#[derive(Clone)]
pub struct UserService {
    pool: DbPool,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(pool: DbPool, jwt: JwtConfig) -> Self {
        Self { pool, jwt }
    }

    /// Register a new user. The unique index on email is the authoritative
    /// duplicate guard; the lookup beforehand only produces the nicer error.
    pub fn signup(&self, signup: Signup) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        if users::find_by_email(&mut conn, &signup.email)?.is_some() {
            return Err(DomainError::EmailTaken);
        }

        let password_hash = passwords::hash_password(&signup.password)?;
        let id = users::insert(
            &mut conn,
            NewUserRow {
                first_name: signup.first_name,
                last_name: signup.last_name,
                email: signup.email,
                password_hash,
            },
        )?;
        log::info!("user {} registered", id);
        Ok(id)
    }

    /// Verify credentials and issue a bearer token carrying the user id.
    pub fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let mut conn = self.pool.get()?;

        let user = users::find_by_email(&mut conn, email)?.ok_or(DomainError::UserNotFound)?;
        if !passwords::verify_password(&user.password_hash, password)? {
            return Err(DomainError::InvalidCredentials);
        }

        tokens::issue(self.jwt.secret.as_bytes(), user.id, self.jwt.expiration_secs)
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        users::find_by_id(&mut conn, id)
    }
}
