use dotenvy::dotenv;
use shop_api::config::AppConfig;
use shop_api::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().expect("invalid configuration");

    let pool = create_pool(&config.database_url).expect("Failed to create database connection pool");
    run_migrations(&pool);

    log::info!(
        "Starting server at http://{}:{}",
        config.host,
        config.port
    );

    build_server(pool, config)?.await
}
