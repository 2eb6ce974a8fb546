pub mod json;
pub mod output_format;
pub mod text;

use std::io::Write;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::events::ClockEvent;
use crate::presentation::output_format::OutputFormat;

/// Drains clock events and writes one rendering per tick.
pub async fn present<W: Write>(
    mut receiver: mpsc::Receiver<ClockEvent>,
    format: OutputFormat,
    track_width: usize,
    mut out: W,
) -> Result<u64> {
    let mut rendered = 0;

    while let Some(event) = receiver.recv().await {
        match event {
            ClockEvent::Tick {
                tick,
                instant,
                snapshots,
            } => {
                match format {
                    OutputFormat::Text => {
                        writeln!(out, "{}", text::render_header(tick, instant))?;
                        for snapshot in &snapshots {
                            writeln!(out, "{}", text::render_line(snapshot, track_width))?;
                        }
                    }
                    OutputFormat::Json => {
                        writeln!(out, "{}", json::render_tick(tick, instant, &snapshots)?)?;
                    }
                }
                out.flush()?;
                rendered += 1;
            }
            ClockEvent::Stopped { ticks } => {
                tracing::debug!(ticks, "tick driver stopped");
                break;
            }
        }
    }

    Ok(rendered)
}
