use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::session::zone::MarketZone;
use crate::types::market::MarketDefinition;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    pub fn from_is_open(is_open: bool) -> Self {
        if is_open { Self::Open } else { Self::Closed }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "MARKET OPEN",
            Self::Closed => "MARKET CLOSED",
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One market evaluated at one instant. Recomputed every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot<'a> {
    pub definition: &'a MarketDefinition,
    pub zone: MarketZone,
    /// Wall-clock time in `zone`, whole seconds.
    pub local_time: NaiveTime,
    pub day_progress: f64,
    pub open_progress: f64,
    pub close_progress: f64,
    pub is_open: bool,
    pub status: MarketStatus,
}

impl MarketSnapshot<'_> {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn local_time_display(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.local_time.hour(),
            self.local_time.minute(),
            self.local_time.second()
        )
    }

    pub fn open_time_display(&self) -> String {
        self.definition.open().to_string()
    }

    pub fn close_time_display(&self) -> String {
        self.definition.close().to_string()
    }
}

/// Owned copy of a snapshot, handed from the tick driver to presenters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRecord {
    pub name: String,
    pub region_label: String,
    pub flag: String,
    pub accent: String,
    pub zone: String,
    pub zone_fallback: bool,
    pub local_time: String,
    pub day_progress: f64,
    pub open_progress: f64,
    pub close_progress: f64,
    pub is_open: bool,
    pub status: MarketStatus,
    pub status_label: String,
    pub open_time_display: String,
    pub close_time_display: String,
}

impl From<&MarketSnapshot<'_>> for SnapshotRecord {
    fn from(snapshot: &MarketSnapshot<'_>) -> Self {
        let definition = snapshot.definition;

        Self {
            name: definition.name().to_string(),
            region_label: definition.region_label().to_string(),
            flag: definition.flag().to_string(),
            accent: definition.accent().to_string(),
            zone: snapshot.zone.to_string(),
            zone_fallback: snapshot.zone.is_fallback(),
            local_time: snapshot.local_time_display(),
            day_progress: snapshot.day_progress,
            open_progress: snapshot.open_progress,
            close_progress: snapshot.close_progress,
            is_open: snapshot.is_open,
            status: snapshot.status,
            status_label: snapshot.status_label().to_string(),
            open_time_display: snapshot.open_time_display(),
            close_time_display: snapshot.close_time_display(),
        }
    }
}
