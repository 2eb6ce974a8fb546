pub mod market_registry;
