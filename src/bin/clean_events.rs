//! Deletes the events of games that finished more than the retention age ago.
//!
//! Meant to be run from cron. Exits non-zero if the sweep fails.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condottieri_events::application::ports::outbound::SystemClock;
use condottieri_events::application::services::RetentionSweeper;
use condottieri_events::infrastructure::config::AppConfig;
use condottieri_events::infrastructure::persistence::SqliteRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "condottieri_events=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let repository = SqliteRepository::connect(&config.database_url)
        .await
        .context("Failed to open event database")?;

    let sweeper = RetentionSweeper::new(Arc::new(repository.events()), Arc::new(SystemClock));
    let report = sweeper.sweep(config.retention()).await?;

    println!("Deleting events that were added before {}", report.threshold);
    println!("{} events were deleted", report.deleted);

    Ok(())
}
