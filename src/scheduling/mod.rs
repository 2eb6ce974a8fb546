pub mod clock;
pub mod status_tracker;
pub mod tick_driver;
