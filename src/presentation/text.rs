use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::market_snapshot::SnapshotRecord;

const SESSION_CELL: char = '#';
const IDLE_CELL: char = '-';
const NOW_CELL: char = '|';

pub fn render_header(tick: u64, instant: DateTime<Utc>) -> String {
    format!(
        "-- tick {tick} @ {} --",
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// 24h track where each cell covers `1 / width` of the local day.
pub fn render_track(snapshot: &SnapshotRecord, width: usize) -> String {
    let width = width.max(1);
    let now_cell = ((snapshot.day_progress * width as f64) as usize).min(width - 1);

    (0..width)
        .map(|cell| {
            let position = cell as f64 / width as f64;
            if cell == now_cell {
                NOW_CELL
            } else if position >= snapshot.open_progress && position < snapshot.close_progress {
                SESSION_CELL
            } else {
                IDLE_CELL
            }
        })
        .collect()
}

pub fn render_line(snapshot: &SnapshotRecord, width: usize) -> String {
    let zone_marker = if snapshot.zone_fallback { "?" } else { "" };

    format!(
        "{} {:<24} {} [{:^13}] [{}] {}-{} ({}{})",
        snapshot.flag,
        snapshot.name,
        snapshot.local_time,
        snapshot.status_label,
        render_track(snapshot, width),
        snapshot.open_time_display,
        snapshot.close_time_display,
        snapshot.zone,
        zone_marker,
    )
}
