mod events;
mod presentation;
mod registry;
mod scheduling;
mod session;
mod types;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::events::ClockEvent;
use crate::presentation::output_format::OutputFormat;
use crate::registry::market_registry::MarketRegistry;
use crate::scheduling::clock::{Clock, FixedClock, SystemClock};
use crate::scheduling::tick_driver::TickDriver;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// YAML market list; the built-in London/New York/Sydney set is used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Evaluate at a fixed RFC 3339 instant instead of the system clock
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    #[arg(long, default_value_t = 48)]
    pub width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "market_clock=info"
                    .parse()
                    .context("invalid default log directive")?,
            ),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let registry = match &args.config {
        Some(path) => MarketRegistry::from_file(path)?,
        None => MarketRegistry::default_markets().clone(),
    };
    for market in &registry {
        info!(%market, "loaded market");
    }

    let clock: Box<dyn Clock> = match args.at {
        Some(instant) => Box::new(FixedClock::new(instant)),
        None => Box::new(SystemClock),
    };

    let mut driver = TickDriver::new(
        Arc::new(registry),
        clock,
        Duration::from_millis(args.interval_ms.max(1)),
    );
    if let Some(ticks) = args.ticks {
        driver = driver.with_max_ticks(ticks);
    }

    info!(format = %args.format, interval_ms = args.interval_ms, "starting market clock");

    let (event_sender, event_receiver) = mpsc::channel::<ClockEvent>(64);
    let driver_handle = tokio::spawn(driver.run(event_sender));

    let rendered = tokio::select! {
        result = presentation::present(event_receiver, args.format, args.width, std::io::stdout()) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            driver_handle.abort();
            return Ok(());
        }
    };

    let ticks = driver_handle.await.context("tick driver task failed")?;
    info!(ticks, rendered, "market clock stopped");

    Ok(())
}
