use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::types::market_snapshot::SnapshotRecord;

pub fn render_tick(tick: u64, instant: DateTime<Utc>, snapshots: &[SnapshotRecord]) -> Result<String> {
    let value = json!({
        "tick": tick,
        "instant": instant,
        "markets": snapshots,
    });

    serde_json::to_string(&value).context("failed to serialize snapshot batch")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::Value;

    use super::*;
    use crate::registry::market_registry::MarketRegistry;
    use crate::session::session_engine::SessionEngine;

    #[test]
    fn renders_markets_in_registry_order() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 10, 12, 0, 0).unwrap();
        let records =
            SessionEngine::compute_batch(instant, MarketRegistry::default_markets()).to_records();

        let line = render_tick(1, instant, &records).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["tick"], 1);
        assert_eq!(value["instant"], "2024-07-10T12:00:00Z");
        assert_eq!(value["markets"][0]["name"], "London (LSE)");
        assert_eq!(value["markets"][0]["local_time"], "13:00:00");
        assert_eq!(value["markets"][0]["status"], "open");
        assert_eq!(value["markets"][1]["local_time"], "08:00:00");
        assert_eq!(value["markets"][1]["status_label"], "MARKET CLOSED");
        assert_eq!(value["markets"][2]["open_time_display"], "10:00");
    }
}
