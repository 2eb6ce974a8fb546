use std::collections::HashMap;

use crate::types::market_snapshot::{MarketStatus, SnapshotRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub market: String,
    pub from: MarketStatus,
    pub to: MarketStatus,
}

/// Remembers each market's status from the previous tick.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last_status: HashMap<String, MarketStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// First sighting of a market is not a transition.
    pub fn observe(&mut self, snapshots: &[SnapshotRecord]) -> Vec<StatusTransition> {
        let mut transitions = Vec::new();

        for snapshot in snapshots {
            if let Some(previous) = self.last_status.insert(snapshot.name.clone(), snapshot.status) {
                if previous != snapshot.status {
                    transitions.push(StatusTransition {
                        market: snapshot.name.clone(),
                        from: previous,
                        to: snapshot.status,
                    });
                }
            }
        }

        transitions
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::registry::market_registry::MarketRegistry;
    use crate::session::session_engine::SessionEngine;

    fn records_at(hour: u32, minute: u32, second: u32) -> Vec<SnapshotRecord> {
        // January: London is on GMT, so UTC equals London local time.
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, second).unwrap();
        SessionEngine::compute_batch(instant, MarketRegistry::default_markets()).to_records()
    }

    #[test]
    fn first_observation_reports_nothing() {
        let mut tracker = StatusTracker::new();
        assert!(tracker.observe(&records_at(8, 0, 0)).is_empty());
    }

    #[test]
    fn reports_london_opening_and_closing() {
        let mut tracker = StatusTracker::new();

        tracker.observe(&records_at(7, 59, 59));
        let opened = tracker.observe(&records_at(8, 0, 0));
        assert_eq!(
            opened,
            vec![StatusTransition {
                market: "London (LSE)".to_string(),
                from: MarketStatus::Closed,
                to: MarketStatus::Open,
            }]
        );

        tracker.observe(&records_at(16, 29, 59));
        let closed = tracker.observe(&records_at(16, 30, 0));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].to, MarketStatus::Closed);
    }
}
