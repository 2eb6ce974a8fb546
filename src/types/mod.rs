pub mod market;
pub mod market_snapshot;
pub mod time_of_day;
pub mod trading_hours;
