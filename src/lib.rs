pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{CheckoutService, ProductService, UserService};
use config::AppConfig;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::users::signup,
        handlers::users::login,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::cart::checkout,
        handlers::orders::get_order,
    ),
    components(schemas(
        handlers::users::SignupRequest,
        handlers::users::LoginRequest,
        handlers::users::TokenResponse,
        handlers::users::MessageResponse,
        handlers::products::ProductResponse,
        handlers::products::CreateProductRequest,
        handlers::products::CreateProductResponse,
        handlers::cart::CartItemRequest,
        handlers::cart::CartCheckoutRequest,
        handlers::cart::CheckoutResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
    )),
    tags(
        (name = "users", description = "Signup and login"),
        (name = "products", description = "Catalog management"),
        (name = "cart", description = "Cart checkout"),
        (name = "orders", description = "Order lookup"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let host = config.host.clone();
    let port = config.port;

    Ok(HttpServer::new(move || {
        let user_service = UserService::new(pool.clone(), config.jwt.clone());
        let product_service = ProductService::new(pool.clone());
        let checkout_service = CheckoutService::new(pool.clone());

        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(user_service))
            .app_data(web::Data::new(product_service))
            .app_data(web::Data::new(checkout_service))
            .wrap(Logger::default())
            .service(
                web::scope("/api/v1")
                    .route("/signup", web::post().to(handlers::users::signup))
                    .route("/login", web::post().to(handlers::users::login))
                    .route("/products", web::get().to(handlers::products::list_products))
                    .route("/products", web::post().to(handlers::products::create_product))
                    .route("/products/{id}", web::get().to(handlers::products::get_product))
                    .route("/cart/checkout", web::post().to(handlers::cart::checkout))
                    .route("/orders/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host, port))?
    .run())
}
