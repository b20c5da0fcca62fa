use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, FromPrimitive};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money_to_f64;
use crate::application::ProductService;
use crate::domain::catalog::{NewProduct, Product};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: String,
}

impl ProductResponse {
    fn try_from_domain(product: Product) -> Result<Self, AppError> {
        Ok(Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image: product.image,
            price: money_to_f64(&product.price)?,
            quantity: product.quantity,
            created_at: product.created_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: i32,
    pub message: String,
}

fn validate_create(payload: &CreateProductRequest) -> Result<(), AppError> {
    if payload.name.trim().is_empty()
        || payload.description.trim().is_empty()
        || payload.image.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "name, description and image are required".to_string(),
        ));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::BadRequest(
            "price must be a non-negative number".to_string(),
        ));
    }
    if payload.quantity < 0 {
        return Err(AppError::BadRequest(
            "quantity must be a non-negative integer".to_string(),
        ));
    }
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/v1/products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All catalog products", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let products = web::block(move || service.list())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses = products
        .into_iter()
        .map(ProductResponse::try_from_domain)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/v1/products/{id}
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<ProductService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let service = service.into_inner();

    let product = web::block(move || service.get(product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::try_from_domain(product)?))
}

/// POST /api/v1/products
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = CreateProductResponse),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<ProductService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validate_create(&body)?;

    let price = BigDecimal::from_f64(body.price)
        .ok_or_else(|| AppError::BadRequest("price must be a finite number".to_string()))?;

    let service = service.into_inner();
    let id = web::block(move || {
        service.create(NewProduct {
            name: body.name,
            description: body.description,
            image: body.image,
            price,
            quantity: body.quantity,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateProductResponse {
        id,
        message: "Product created successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::{validate_create, CreateProductRequest};

    fn payload() -> CreateProductRequest {
        CreateProductRequest {
            name: "lamp".to_string(),
            description: "a desk lamp".to_string(),
            image: "https://example.com/lamp.png".to_string(),
            price: 19.99,
            quantity: 7,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate_create(&payload()).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut p = payload();
        p.name = String::new();
        assert!(validate_create(&p).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut p = payload();
        p.price = -1.0;
        assert!(validate_create(&p).is_err());
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let mut p = payload();
        p.price = f64::NAN;
        assert!(validate_create(&p).is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut p = payload();
        p.quantity = -3;
        assert!(validate_create(&p).is_err());
    }
}
