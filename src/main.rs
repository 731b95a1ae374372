use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ah_price_watch::config::Config;
use ah_price_watch::error::AppError;
use ah_price_watch::services::delta;
use ah_price_watch::services::feed::FeedClient;
use ah_price_watch::services::history::HistoryStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let mut opts = ConnectOptions::new(config.database_url);
    opts.connect_timeout(Duration::from_secs(10));
    let db = Database::connect(opts)
        .await
        .map_err(AppError::Connection)?;
    tracing::info!("Database connection established");

    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let store = HistoryStore::new(db);
    store.verify_schema().await?;

    let feed = FeedClient::new(config.feed_url);
    let records = feed.fetch_batch().await?;
    tracing::info!("Fetched {} feed entries", records.len());

    let inserted = store.append(&records).await?;
    tracing::info!("Stored {} price observations", inserted);

    let report = delta::report_from_store(&store).await?;

    let mut unavailable = 0;
    for d in &report.deltas {
        match (d.previous_price, d.current_price, d.delta) {
            (Some(previous), Some(current), Some(change)) => tracing::info!(
                "item {}: {} -> {} ({:+}) between {} and {}",
                d.item_id,
                previous,
                current,
                change,
                d.previous_timestamp,
                d.current_timestamp
            ),
            _ => {
                unavailable += 1;
                tracing::info!(
                    "item {}: delta unavailable (no buyout on one side)",
                    d.item_id
                );
            }
        }
    }

    tracing::info!("=== Report complete ===");
    tracing::info!("Items compared: {}", report.deltas.len());
    tracing::info!(
        "Items with a single observation: {}",
        report.single_observation_items
    );
    tracing::info!("Items without a usable delta: {}", unavailable);

    Ok(())
}
