use chrono::{DateTime, Utc};

use crate::types::market_snapshot::SnapshotRecord;

#[derive(Debug, Clone)]
pub enum ClockEvent {
    Tick {
        tick: u64,
        instant: DateTime<Utc>,
        snapshots: Vec<SnapshotRecord>,
    },
    Stopped {
        ticks: u64,
    },
}
