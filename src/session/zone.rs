use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

static WARNED_ZONES: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// The zone a market's clock is evaluated in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarketZone {
    Named(Tz),
    /// Host local zone, used when the configured identifier does not resolve.
    HostLocal,
}

impl MarketZone {
    pub fn resolve(time_zone_id: &str) -> Self {
        match time_zone_id.trim().parse::<Tz>() {
            Ok(tz) => Self::Named(tz),
            Err(error) => {
                warn_once(time_zone_id, &error.to_string());
                Self::HostLocal
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::HostLocal)
    }

    /// Wall-clock time of day at `instant`, truncated to whole seconds.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        let time = match self {
            Self::Named(tz) => instant.with_timezone(tz).time(),
            Self::HostLocal => instant.with_timezone(&Local).time(),
        };

        NaiveTime::from_num_seconds_from_midnight_opt(time.num_seconds_from_midnight(), 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for MarketZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::HostLocal => write!(f, "local"),
        }
    }
}

fn warn_once(time_zone_id: &str, reason: &str) {
    let mut warned = match WARNED_ZONES.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if warned.insert(time_zone_id.to_string()) {
        tracing::warn!(
            time_zone_id,
            reason,
            "unknown time zone; falling back to host local zone"
        );
    }
}
