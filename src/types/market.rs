use std::fmt;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::types::time_of_day::TimeOfDay;
use crate::types::trading_hours::TradingHours;

/// Static description of a market. Built once and never mutated.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDefinition {
    name: String,
    region_label: String,
    #[serde(default)]
    flag: String,
    time_zone_id: String,
    #[serde(flatten)]
    trading_hours: TradingHours,
    #[serde(default)]
    accent: String,
}

impl MarketDefinition {
    pub fn new(
        name: impl Into<String>,
        region_label: impl Into<String>,
        time_zone_id: impl Into<String>,
        open: TimeOfDay,
        close: TimeOfDay,
    ) -> Result<Self> {
        let definition = Self {
            name: name.into(),
            region_label: region_label.into(),
            flag: String::new(),
            time_zone_id: time_zone_id.into(),
            trading_hours: TradingHours { open, close },
            accent: String::new(),
        };
        definition.validate()?;

        Ok(definition)
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region_label(&self) -> &str {
        &self.region_label
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// IANA identifier. Not checked here; the session engine resolves it.
    pub fn time_zone_id(&self) -> &str {
        &self.time_zone_id
    }

    pub fn trading_hours(&self) -> &TradingHours {
        &self.trading_hours
    }

    pub fn open(&self) -> TimeOfDay {
        self.trading_hours.open
    }

    pub fn close(&self) -> TimeOfDay {
        self.trading_hours.close
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("market name must not be empty");
        }
        self.trading_hours
            .validate()
            .with_context(|| format!("invalid trading hours for market {}", self.name))
    }
}

impl fmt::Display for MarketDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} [{}] {}-{}",
            self.name, self.time_zone_id, self.trading_hours.open, self.trading_hours.close
        )
    }
}

impl fmt::Debug for MarketDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarketDefinition({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn builds_valid_definition() {
        let market = MarketDefinition::new("Tokyo (TSE)", "Tokyo", "Asia/Tokyo", time(9, 0), time(15, 0))
            .unwrap()
            .with_flag("🇯🇵")
            .with_accent("red");

        assert_eq!(market.name(), "Tokyo (TSE)");
        assert_eq!(market.open().to_string(), "09:00");
        assert_eq!(market.accent(), "red");
        assert_eq!(market.to_string(), "Tokyo (TSE) [Asia/Tokyo] 09:00-15:00");
    }

    #[test]
    fn rejects_open_after_close() {
        let error = MarketDefinition::new("Late", "Nowhere", "UTC", time(17, 0), time(9, 0))
            .unwrap_err();

        assert!(format!("{error:#}").contains("invalid trading hours for market Late"));
    }

    #[test]
    fn rejects_blank_name() {
        assert!(MarketDefinition::new(" ", "x", "UTC", time(9, 0), time(10, 0)).is_err());
    }

    #[test]
    fn blank_zone_is_accepted_at_construction() {
        let market = MarketDefinition::new("Blank", "Blank", "", time(9, 0), time(10, 0)).unwrap();
        assert_eq!(market.time_zone_id(), "");
    }

    #[test]
    fn unknown_zone_is_accepted_at_construction() {
        assert!(MarketDefinition::new("Mars", "Mars", "Mars/Olympus", time(9, 0), time(10, 0)).is_ok());
    }
}
