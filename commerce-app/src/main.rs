//! # Commerce Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the payment and user services
//! - Start the HTTP server

mod config;

use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use commerce_hex::{PaymentService, UserService, inbound::HttpServer};
use commerce_repo::build_repo;

use config::{Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,commerce_app=debug,commerce_hex=debug".into()),
        )
        .with(fmt_layer)
        .init();

    tracing::info!("Starting commerce server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and schema)
    let repo = build_repo(&config.database_url).await?;

    let payments = PaymentService::new(repo.payments());
    let users = UserService::new(repo.users());

    // Create and run the HTTP server
    let server = HttpServer::new(payments, users);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
