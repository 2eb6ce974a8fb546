use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Local wall-clock time of day with minute granularity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            bail!("hour must be 0-23, got {hour}");
        }
        if minute > 59 {
            bail!("minute must be 0-59, got {minute}");
        }

        Ok(Self { hour, minute })
    }

    pub fn seconds_since_midnight(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60
    }

    /// Position of this time on a 24h track, in [0, 1).
    pub fn day_fraction(self) -> f64 {
        self.seconds_since_midnight() as f64 / SECONDS_PER_DAY as f64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow!("expected HH:MM, got \"{s}\""))?;

        let hour = hour
            .parse::<u8>()
            .with_context(|| format!("invalid hour in \"{s}\""))?;
        let minute = minute
            .parse::<u8>()
            .with_context(|| format!("invalid minute in \"{s}\""))?;

        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_zero_padded_24_hour() {
        assert_eq!(TimeOfDay::new(9, 30).unwrap().to_string(), "09:30");
        assert_eq!(TimeOfDay::new(16, 0).unwrap().to_string(), "16:00");
        assert_eq!(TimeOfDay::new(0, 5).unwrap().to_string(), "00:05");
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(12, 60).is_err());
        assert!(TimeOfDay::new(23, 59).is_ok());
    }

    #[test]
    fn parses_hh_mm() {
        let time: TimeOfDay = "08:00".parse().unwrap();
        assert_eq!(time, TimeOfDay::new(8, 0).unwrap());

        assert!("8".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("ab:cd".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn seconds_and_fraction() {
        let close = TimeOfDay::new(16, 30).unwrap();
        assert_eq!(close.seconds_since_midnight(), 59_400);
        assert_eq!(TimeOfDay::new(12, 0).unwrap().day_fraction(), 0.5);
        assert!(TimeOfDay::new(23, 59).unwrap().day_fraction() < 1.0);
    }
}
