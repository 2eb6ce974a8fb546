use chrono::{DateTime, Timelike, Utc};

use crate::registry::market_registry::MarketRegistry;
use crate::session::zone::MarketZone;
use crate::types::market::MarketDefinition;
use crate::types::market_snapshot::{MarketSnapshot, MarketStatus, SnapshotRecord};
use crate::types::time_of_day::SECONDS_PER_DAY;

/// Every market in a registry evaluated at the same instant, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotBatch<'a> {
    pub instant: DateTime<Utc>,
    pub snapshots: Vec<MarketSnapshot<'a>>,
}

impl SnapshotBatch<'_> {
    pub fn to_records(&self) -> Vec<SnapshotRecord> {
        self.snapshots.iter().map(SnapshotRecord::from).collect()
    }
}

/// Stateless; identical inputs always give identical snapshots.
pub struct SessionEngine;

impl SessionEngine {
    pub fn compute_snapshot(
        instant: DateTime<Utc>,
        definition: &MarketDefinition,
    ) -> MarketSnapshot<'_> {
        let zone = MarketZone::resolve(definition.time_zone_id());
        let local_time = zone.local_time(instant);

        let seconds = local_time.num_seconds_from_midnight();
        let trading_hours = definition.trading_hours();
        let is_open = trading_hours.is_within_hours(seconds);

        MarketSnapshot {
            definition,
            zone,
            local_time,
            day_progress: seconds as f64 / SECONDS_PER_DAY as f64,
            open_progress: trading_hours.open.day_fraction(),
            close_progress: trading_hours.close.day_fraction(),
            is_open,
            status: MarketStatus::from_is_open(is_open),
        }
    }

    pub fn compute_batch(instant: DateTime<Utc>, registry: &MarketRegistry) -> SnapshotBatch<'_> {
        SnapshotBatch {
            instant,
            snapshots: registry
                .iter()
                .map(|definition| Self::compute_snapshot(instant, definition))
                .collect(),
        }
    }
}
