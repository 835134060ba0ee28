use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_service::clients::{HttpInventoryClient, InMemoryInventory, InventoryChecker};
use order_service::config::AppConfig;
use order_service::metrics::Metrics;
use order_service::store::{InMemoryOrderStore, OrderStore, PostgresOrderStore};
use order_service::web::{self, AppContext, MessageLocalizer, StaticLocalizer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Initialize structured logging with environment-based filtering
    // Default comes from config, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    tracing::info!("📦 Starting order service");

    // === 1. Metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 2. Inventory checker ===
    let inventory: Arc<dyn InventoryChecker> = match &config.inventory_url {
        Some(url) => {
            tracing::info!(url = %url, "Using inventory service");
            Arc::new(HttpInventoryClient::new(url.as_str()))
        }
        None => {
            tracing::warn!(
                skus = config.inventory.len(),
                "No inventory_url configured, using in-memory inventory"
            );
            Arc::new(InMemoryInventory::with_stock(config.inventory.clone()))
        }
    };

    // === 3. Order store ===
    let store: Arc<dyn OrderStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL...");
            Arc::new(PostgresOrderStore::connect(url, config.database_max_connections).await?)
        }
        None => {
            tracing::warn!("No database_url configured, orders are kept in memory");
            Arc::new(InMemoryOrderStore::new())
        }
    };

    // === 4. Localizer ===
    let localizer: Arc<dyn MessageLocalizer> =
        Arc::new(StaticLocalizer::with_overrides(config.messages.clone()));

    // === 5. Serve ===
    let context = AppContext::new(inventory, store, localizer, metrics);
    web::serve(context, &config.server.host, config.server.port).await?;

    tracing::info!("Order service stopped");

    Ok(())
}
