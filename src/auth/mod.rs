pub mod passwords;
pub mod tokens;

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use crate::config::AppConfig;
use crate::errors::AppError;

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Handlers receive this as a plain argument; nothing is smuggled through
/// request-local state.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub i32);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

fn resolve(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| AppError::Internal("application config is not registered".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authorization header is missing".to_string()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("token is missing".to_string()))?;

    let claims = tokens::verify(config.jwt.secret.as_bytes(), token)
        .map_err(|_| AppError::Unauthorized("invalid token".to_string()))?;

    Ok(AuthenticatedUser(claims.sub))
}

#[cfg(test)]
mod tests {
    use actix_web::http::header;
    use actix_web::test::TestRequest;
    use actix_web::web;

    use super::{tokens, AuthenticatedUser};
    use crate::config::{AppConfig, JwtConfig};
    use crate::errors::AppError;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "postgres://unused".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt: JwtConfig {
                secret: "extractor-secret".to_string(),
                expiration_secs: 3600,
            },
        }
    }

    fn resolve_with(auth_header: Option<&str>) -> Result<AuthenticatedUser, AppError> {
        let mut req = TestRequest::default().app_data(web::Data::new(config()));
        if let Some(value) = auth_header {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        super::resolve(&req.to_http_request())
    }

    #[test]
    fn valid_bearer_token_resolves_the_user() {
        let token = tokens::issue(b"extractor-secret", 7, 3600).expect("issue failed");
        let user = resolve_with(Some(&format!("Bearer {token}"))).expect("resolve failed");
        assert_eq!(user.0, 7);
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert!(matches!(resolve_with(None), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn empty_bearer_token_is_unauthorized() {
        assert!(matches!(
            resolve_with(Some("Bearer ")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_unauthorized() {
        let token = tokens::issue(b"some-other-secret", 7, 3600).expect("issue failed");
        assert!(matches!(
            resolve_with(Some(&format!("Bearer {token}"))),
            Err(AppError::Unauthorized(_))
        ));
    }
}
