use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::events::ClockEvent;
use crate::registry::market_registry::MarketRegistry;
use crate::scheduling::clock::Clock;
use crate::scheduling::status_tracker::StatusTracker;
use crate::session::session_engine::SessionEngine;

/// Evaluates every market on a fixed cadence and hands the results to a consumer.
pub struct TickDriver {
    registry: Arc<MarketRegistry>,
    clock: Box<dyn Clock>,
    interval: Duration,
    max_ticks: Option<u64>,
    status_tracker: StatusTracker,
}

impl TickDriver {
    pub fn new(registry: Arc<MarketRegistry>, clock: Box<dyn Clock>, interval: Duration) -> Self {
        Self {
            registry,
            clock,
            interval,
            max_ticks: None,
            status_tracker: StatusTracker::new(),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Runs until `max_ticks` is reached or the receiver goes away.
    pub async fn run(mut self, sender: mpsc::Sender<ClockEvent>) -> u64 {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks: u64 = 0;

        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            interval.tick().await;

            let batch = SessionEngine::compute_batch(self.clock.now(), &self.registry);
            let instant = batch.instant;
            let snapshots = batch.to_records();

            for transition in self.status_tracker.observe(&snapshots) {
                info!(
                    market = %transition.market,
                    from = %transition.from,
                    to = %transition.to,
                    "market status changed"
                );
            }

            ticks += 1;
            let event = ClockEvent::Tick {
                tick: ticks,
                instant,
                snapshots,
            };

            if sender.send(event).await.is_err() {
                debug!(ticks, "snapshot receiver dropped; stopping tick driver");
                return ticks;
            }
        }

        let _ = sender.send(ClockEvent::Stopped { ticks }).await;

        ticks
    }
}
