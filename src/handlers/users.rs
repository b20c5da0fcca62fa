use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::UserService;
use crate::domain::user::Signup;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn validate_signup(payload: &SignupRequest) -> Result<(), AppError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first and last name are required".to_string(),
        ));
    }
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("email is not valid".to_string()));
    }
    if !(6..=20).contains(&payload.password.chars().count()) {
        return Err(AppError::BadRequest(
            "password must be between 6 and 20 characters".to_string(),
        ));
    }
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/v1/signup
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "users"
)]
pub async fn signup(
    service: web::Data<UserService>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validate_signup(&body)?;

    let service = service.into_inner();
    web::block(move || {
        service.signup(Signup {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

/// POST /api/v1/login
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn login(
    service: web::Data<UserService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let service = service.into_inner();

    let token = web::block(move || service.login(&body.email, &body.password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
