use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::types::time_of_day::TimeOfDay;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingHours {
    /// Session open in market-local time (inclusive)
    pub open: TimeOfDay,

    /// Session close in market-local time (exclusive)
    pub close: TimeOfDay,
}

impl TradingHours {
    pub fn open_seconds(&self) -> u32 {
        self.open.seconds_since_midnight()
    }

    pub fn close_seconds(&self) -> u32 {
        self.close.seconds_since_midnight()
    }

    pub fn is_within_hours(&self, seconds_since_midnight: u32) -> bool {
        seconds_since_midnight >= self.open_seconds() && seconds_since_midnight < self.close_seconds()
    }

    pub fn validate(&self) -> Result<()> {
        // Sessions wrapping local midnight are not supported.
        if self.open >= self.close {
            bail!(
                "open ({}) must be earlier than close ({})",
                self.open,
                self.close
            );
        }
        Ok(())
    }
}
