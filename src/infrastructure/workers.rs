//! Background workers

use std::time::Duration;

use crate::application::services::RetentionSweeper;

/// Worker that periodically deletes the logs of long finished games.
///
/// A failed sweep is logged and retried on the next tick.
pub async fn retention_worker(sweeper: RetentionSweeper, max_age: Duration, interval: Duration) {
    tracing::info!(
        "Starting retention worker (max age {}s, every {}s)",
        max_age.as_secs(),
        interval.as_secs()
    );
    loop {
        match sweeper.sweep(max_age).await {
            Ok(report) => {
                tracing::debug!("Retention sweep deleted {} events", report.deleted);
            }
            Err(e) => {
                tracing::error!("Retention sweep failed: {:#}", e);
            }
        }
        tokio::time::sleep(interval).await;
    }
}
