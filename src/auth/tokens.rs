use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: i32,
    /// Expiry as a unix timestamp, enforced on verification.
    pub exp: i64,
}

/// Sign an HS256 bearer token carrying the user id.
pub fn issue(secret: &[u8], user_id: i32, ttl_secs: i64) -> Result<String, DomainError> {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + Duration::seconds(ttl_secs)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| DomainError::Internal(format!("token signing failed: {e}")))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify(secret: &[u8], token: &str) -> Result<Claims, DomainError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| DomainError::InvalidCredentials)
}
