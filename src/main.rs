mod api;
mod application;
mod domain;
mod infrastructure;
mod ports;

use api::AppState;
use application::PaymentService;
use infrastructure::{MySqlCurrencyRepository, MySqlOrderRepository, PayGateAdapter, PayGateConfig};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    info!("Starting PayGate Payment Service...");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    info!("Connecting to database...");

    let pool = Arc::new(MySqlPool::connect(&database_url).await?);
    info!("Database connected successfully");

    let config = PayGateConfig::from_env();
    info!(
        "PayGate configuration loaded for merchant: {} (sandbox: {})",
        config.paygate_id, config.use_sandbox
    );

    let gateway = Arc::new(PayGateAdapter::new(config.clone())?);
    let orders = Arc::new(MySqlOrderRepository::new(pool.clone()));
    let currencies = Arc::new(MySqlCurrencyRepository::new(pool));

    let payment_service = Arc::new(PaymentService::new(
        gateway,
        orders,
        currencies,
        config.credentials(),
        config.store_url.clone(),
    ));

    let app_state = AppState { payment_service };

    let app = api::create_router(app_state);

    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET  /health - Health check");
    info!("  POST /api/orders/:order_id/paygate - Initiate PayGate payment");
    info!("  GET  /Plugins/PaymentPayGate/PayGateReturnHandler - Gateway return callback");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
