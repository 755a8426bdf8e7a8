//! Retention sweeper - Deletes the logs of games that ended long ago

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::application::ports::outbound::{ClockPort, EventStorePort};

/// Age after which the logs of finished games are deleted
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Outcome of one sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Games whose last phase change is before this instant were swept
    pub threshold: DateTime<Utc>,
    pub deleted: u64,
}

#[derive(Clone)]
pub struct RetentionSweeper {
    events: Arc<dyn EventStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl RetentionSweeper {
    pub fn new(events: Arc<dyn EventStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { events, clock }
    }

    /// Delete every event of finished games idle for longer than `max_age`.
    ///
    /// Events of running games are kept regardless of age.
    #[instrument(skip(self))]
    pub async fn sweep(&self, max_age: Duration) -> Result<SweepReport> {
        let age = chrono::Duration::from_std(max_age).context("Retention age is out of range")?;
        let threshold = self
            .clock
            .now()
            .checked_sub_signed(age)
            .context("Retention age reaches before the earliest representable time")?;
        info!(threshold = %threshold, "Deleting events of games finished before threshold");

        let deleted = self
            .events
            .delete_for_finished_games(threshold)
            .await
            .context("Failed to delete old events")?;

        info!(deleted, "Old events deleted");
        Ok(SweepReport { threshold, deleted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{MockClockPort, MockEventStorePort, StoreError};
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_sweep_uses_clock_and_age() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 5, 16, 10, 30, 0).unwrap();

        let mut clock = MockClockPort::new();
        clock.expect_now().returning(move || now);

        let mut events = MockEventStorePort::new();
        events
            .expect_delete_for_finished_games()
            .withf(move |cutoff| *cutoff == expected)
            .times(1)
            .returning(|_| Ok(4));

        let sweeper = RetentionSweeper::new(Arc::new(events), Arc::new(clock));
        let report = sweeper.sweep(DEFAULT_MAX_AGE).await.unwrap();

        assert_eq!(report.threshold, expected);
        assert_eq!(report.deleted, 4);
    }

    #[tokio::test]
    async fn test_oversized_age_is_an_error() {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);

        let mut events = MockEventStorePort::new();
        events.expect_delete_for_finished_games().never();

        let sweeper = RetentionSweeper::new(Arc::new(events), Arc::new(clock));
        let too_old = Duration::from_secs(1_000_000_000 * 86400);
        assert!(sweeper.sweep(too_old).await.is_err());
        assert!(sweeper.sweep(Duration::MAX).await.is_err());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);

        let mut events = MockEventStorePort::new();
        events
            .expect_delete_for_finished_games()
            .returning(|_| Err(StoreError::database("delete_old_events", "database is locked")));

        let sweeper = RetentionSweeper::new(Arc::new(events), Arc::new(clock));
        assert!(sweeper.sweep(DEFAULT_MAX_AGE).await.is_err());
    }

    #[tokio::test]
    async fn test_sweep_against_sqlite() {
        use crate::application::ports::outbound::{EventFilter, GameRepositoryPort};
        use crate::domain::entities::{EventPayload, Game, NewEvent, StandoffEvent};
        use crate::domain::value_objects::{AreaId, Phase, Season};
        use crate::infrastructure::persistence::SqliteRepository;

        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        let repo = SqliteRepository::in_memory().await.unwrap();

        let stale = Game::new(1482, Season::Fall, Phase::Inactive)
            .with_last_phase_change(now - chrono::Duration::days(40));
        let fresh = Game::new(1471, Season::Summer, Phase::Inactive)
            .with_last_phase_change(now - chrono::Duration::days(5));
        let running = Game::new(1460, Season::Spring, Phase::Movement)
            .with_last_phase_change(now - chrono::Duration::days(90));
        for game in [&stale, &fresh, &running] {
            repo.games().save(game).await.unwrap();
            repo.events()
                .insert(&NewEvent::for_game(
                    game,
                    EventPayload::Standoff(StandoffEvent { area: AreaId::new() }),
                ))
                .await
                .unwrap();
        }

        let mut clock = MockClockPort::new();
        clock.expect_now().returning(move || now);
        let sweeper = RetentionSweeper::new(Arc::new(repo.events()), Arc::new(clock));

        assert_eq!(sweeper.sweep(DEFAULT_MAX_AGE).await.unwrap().deleted, 1);
        assert_eq!(sweeper.sweep(DEFAULT_MAX_AGE).await.unwrap().deleted, 0);

        let events = repo.events();
        assert!(events.list(&EventFilter::for_game(stale.id)).await.unwrap().is_empty());
        assert_eq!(events.list(&EventFilter::for_game(fresh.id)).await.unwrap().len(), 1);
        assert_eq!(events.list(&EventFilter::for_game(running.id)).await.unwrap().len(), 1);
    }
}
