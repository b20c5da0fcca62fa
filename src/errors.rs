use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingIdentity | DomainError::InvalidCredentials => {
                AppError::Unauthorized(e.to_string())
            }
            DomainError::EmptyCart
            | DomainError::InvalidQuantity
            | DomainError::OutOfStock { .. }
            | DomainError::InsufficientStock { .. } => AppError::BadRequest(e.to_string()),
            DomainError::ProductNotFound(_) | DomainError::UserNotFound | DomainError::NotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::EmailTaken | DomainError::Concurrency { .. } => {
                AppError::Conflict(e.to_string())
            }
            DomainError::Timeout => AppError::Timeout,
            DomainError::ReservationFailed { .. } | DomainError::Internal(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Store internals stay in the logs, not in responses.
            AppError::Internal(detail) => {
                log::error!("internal error: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}
