//! Sorter Demo
//!
//! Headless driver for the sorting core. Generates a dataset, runs one
//! full animated quicksort, then a second sort to show the linear-time
//! reversal shortcut, logging every message the core emits.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (12 numbers, 500ms pacing)
//! sorter-demo
//!
//! # Faster animation and a bigger dataset
//! SORTER_DEMO_COUNT=40 SORTER_STEP_DELAY_MS=50 sorter-demo
//!
//! # With verbose logging
//! RUST_LOG=debug sorter-demo
//! ```
//!
//! # Environment Variables
//!
//! - `SORTER_DEMO_COUNT`: dataset size (default: 12)
//! - `SORTER_STEP_DELAY_MS`: pacing delay between steps
//! - `SORTER_SMALL_BOUND` / `SORTER_LARGE_BOUND`: generation bounds
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

use tokio::sync::mpsc;
use tracing::{debug, info};

use sorter_core::{ObservationEvent, SortController, SorterConfig, SorterMessage};

/// Dataset size when `SORTER_DEMO_COUNT` is unset
const DEFAULT_COUNT: usize = 12;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sorter_demo=info".parse()?)
                .add_directive("sorter_core=info".parse()?),
        )
        .with_target(true)
        .init();

    let count = std::env::var("SORTER_DEMO_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_COUNT);
    let config = SorterConfig::from_env();
    let delay_ms = config.step_delay.as_millis() as u64;

    info!(count, delay_ms, "starting sorter demo");

    let (controller, mut rx) = SortController::channel(config);

    controller.request_generate(count).await?;

    // First sort: full quicksort, ascending.
    controller.request_sort().await?;
    drain_until_terminal(&mut rx).await;
    info!(state = ?controller.sort_state(), "first sort done");

    // Second sort: the dataset is already sorted the other way, so the
    // core takes the O(n) reversal shortcut.
    controller.request_sort().await?;
    drain_until_terminal(&mut rx).await;
    info!(state = ?controller.sort_state(), "second sort done");

    info!(values = ?controller.snapshot(), "final dataset");
    Ok(())
}

/// Log messages until the current sort reports its terminal event
async fn drain_until_terminal(rx: &mut mpsc::Receiver<SorterMessage>) {
    while let Some(message) = rx.recv().await {
        match message {
            SorterMessage::DatasetReplaced { values } => {
                info!(?values, "dataset replaced");
            }
            SorterMessage::SortStarted { direction } => {
                info!(%direction, "sort started");
            }
            SorterMessage::Observation(event) => match event {
                ObservationEvent::PivotChosen { index } => {
                    debug!(index, "pivot chosen");
                }
                ObservationEvent::RangeSwapped { i, j, before, after } => {
                    debug!(i, j, ?before, ?after, "swapped");
                }
                ObservationEvent::SortComplete => {
                    info!("sort complete");
                    return;
                }
                ObservationEvent::Cancelled => {
                    info!("sort cancelled");
                    return;
                }
            },
            SorterMessage::SortFailed { error } => {
                info!(%error, "sort failed");
                return;
            }
        }
    }
}
