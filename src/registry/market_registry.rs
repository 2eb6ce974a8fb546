use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::types::market::MarketDefinition;
use crate::types::time_of_day::TimeOfDay;

static DEFAULT_MARKETS: Lazy<MarketRegistry> = Lazy::new(|| MarketRegistry {
    markets: vec![
        default_market(
            "London (LSE)",
            "London",
            "🇬🇧",
            "Europe/London",
            "blue",
            (8, 0),
            (16, 30),
        ),
        default_market(
            "New York (NYSE/NASDAQ)",
            "New York",
            "🇺🇸",
            "America/New_York",
            "green",
            (9, 30),
            (16, 0),
        ),
        default_market(
            "Sydney (ASX)",
            "Sydney",
            "🇦🇺",
            "Australia/Sydney",
            "orange",
            (10, 0),
            (16, 0),
        ),
    ],
});

/// Ordered, read-only list of markets.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRegistry {
    markets: Vec<MarketDefinition>,
}

impl MarketRegistry {
    pub fn new(markets: Vec<MarketDefinition>) -> Result<Self> {
        let registry = Self { markets };
        registry.validate()?;

        Ok(registry)
    }

    /// London, New York and Sydney.
    pub fn default_markets() -> &'static MarketRegistry {
        &DEFAULT_MARKETS
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read markets config {}", path.display()))?;

        Self::from_yaml(&raw)
            .with_context(|| format!("failed to load markets config {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: MarketsConfig =
            serde_yaml::from_str(raw).context("failed to parse markets config")?;

        Self::new(config.markets).context("markets config validation failed")
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketDefinition> {
        self.markets.iter()
    }

    pub fn get(&self, name: &str) -> Option<&MarketDefinition> {
        self.markets.iter().find(|market| market.name() == name)
    }

    /// Checks each definition; zone ids are left to the session engine.
    fn validate(&self) -> Result<()> {
        for (index, market) in self.markets.iter().enumerate() {
            market
                .validate()
                .with_context(|| format!("invalid market at position {index}"))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MarketRegistry {
    type Item = &'a MarketDefinition;
    type IntoIter = std::slice::Iter<'a, MarketDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.markets.iter()
    }
}

#[derive(Debug, Deserialize)]
struct MarketsConfig {
    pub markets: Vec<MarketDefinition>,
}

fn default_market(
    name: &str,
    region_label: &str,
    flag: &str,
    time_zone_id: &str,
    accent: &str,
    open: (u8, u8),
    close: (u8, u8),
) -> MarketDefinition {
    let market = TimeOfDay::new(open.0, open.1).and_then(|open| {
        let close = TimeOfDay::new(close.0, close.1)?;
        MarketDefinition::new(name, region_label, time_zone_id, open, close)
    });

    match market {
        Ok(market) => market.with_flag(flag).with_accent(accent),
        Err(error) => panic!("built-in market {name} is invalid: {error:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markets_are_ordered() {
        let names: Vec<&str> = MarketRegistry::default_markets()
            .iter()
            .map(|market| market.name())
            .collect();

        assert_eq!(
            names,
            vec!["London (LSE)", "New York (NYSE/NASDAQ)", "Sydney (ASX)"]
        );
    }

    #[test]
    fn default_market_hours() {
        let registry = MarketRegistry::default_markets();
        let new_york = registry.get("New York (NYSE/NASDAQ)").unwrap();

        assert_eq!(new_york.time_zone_id(), "America/New_York");
        assert_eq!(new_york.open().to_string(), "09:30");
        assert_eq!(new_york.close().to_string(), "16:00");
        assert_eq!(registry.get("London (LSE)").unwrap().flag(), "🇬🇧");
    }

    #[test]
    fn loads_yaml_config() {
        let registry = MarketRegistry::from_yaml(
            r#"
markets:
  - name: Tokyo (TSE)
    region_label: Tokyo
    flag: "🇯🇵"
    time_zone_id: Asia/Tokyo
    open: "09:00"
    close: "15:00"
    accent: red
  - name: Frankfurt (XETRA)
    region_label: Frankfurt
    time_zone_id: Europe/Berlin
    open: "09:00"
    close: "17:30"
"#,
        )
        .unwrap();

        assert_eq!(registry.iter().count(), 2);
        let frankfurt = registry.get("Frankfurt (XETRA)").unwrap();
        assert_eq!(frankfurt.close().to_string(), "17:30");
        assert_eq!(frankfurt.flag(), "");
    }

    #[test]
    fn rejects_overnight_session_in_config() {
        let error = MarketRegistry::from_yaml(
            r#"
markets:
  - name: Night
    region_label: Night
    time_zone_id: UTC
    open: "22:00"
    close: "06:00"
"#,
        )
        .unwrap_err();

        assert!(format!("{error:#}").contains("must be earlier than close"));
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(
            MarketRegistry::from_yaml(
                r#"
markets:
  - name: Bad
    region_label: Bad
    time_zone_id: UTC
    open: "9h"
    close: "17:00"
"#
            )
            .is_err()
        );
    }

    #[test]
    fn accepts_empty_and_repeated_lists() {
        assert_eq!(MarketRegistry::from_yaml("markets: []").unwrap().iter().count(), 0);
        assert!(MarketRegistry::new(Vec::new()).is_ok());

        let market = MarketRegistry::default_markets().iter().next().unwrap().clone();
        let registry = MarketRegistry::new(vec![market.clone(), market]).unwrap();
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn blank_zone_id_is_left_to_the_engine() {
        let registry = MarketRegistry::from_yaml(
            r#"
markets:
  - name: Blank
    region_label: Blank
    time_zone_id: ""
    open: "09:00"
    close: "17:00"
"#,
        )
        .unwrap();

        assert_eq!(registry.get("Blank").unwrap().time_zone_id(), "");
    }

    #[test]
    fn bundled_config_extends_defaults() {
        let registry = MarketRegistry::from_file("markets.yml").unwrap();
        let defaults = MarketRegistry::default_markets();

        assert_eq!(registry.iter().count(), 4);
        for (loaded, builtin) in registry.iter().zip(defaults) {
            assert_eq!(loaded, builtin);
        }
        assert_eq!(registry.get("Tokyo (TSE)").unwrap().time_zone_id(), "Asia/Tokyo");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = MarketRegistry::from_file("does/not/exist.yml").unwrap_err();
        assert!(format!("{error:#}").contains("does/not/exist.yml"));
    }
}
