//! Sort Controller
//!
//! The orchestration facade of the core: maps surface requests onto the
//! store and the engine, owns the busy gate that keeps dataset mutations
//! and in-flight sorts mutually exclusive, and runs the background/paced
//! execution model.
//!
//! # Design Philosophy
//!
//! The controller is UI-agnostic. It receives [`SurfaceRequest`]s from
//! whatever surface is attached and answers through a tokio channel of
//! [`SorterMessage`]s; the observer side never runs on the thread that
//! mutates the store. A sort executes on a blocking worker, one at a
//! time; every other request fails fast with
//! [`SortError::ConcurrentSortInProgress`] while one is in flight rather
//! than queueing or blocking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::SorterConfig;
use crate::engine::{AnimatedQuicksort, SortDirection, SortState};
use crate::error::SortError;
use crate::messages::SorterMessage;
use crate::requests::SurfaceRequest;
use crate::store::SequenceStore;

/// Headless orchestration facade over the store and the engine
pub struct SortController {
    /// Configuration (pacing, bounds, channel sizing)
    config: SorterConfig,
    /// The dataset being displayed and sorted
    store: Arc<Mutex<SequenceStore>>,
    /// The sorting engine and its direction/state machine
    engine: Arc<Mutex<AnimatedQuicksort>>,
    /// Busy gate: set for the whole lifetime of a background sort; every
    /// store-mutating request checks it before touching any lock
    busy: Arc<AtomicBool>,
    /// Cancellation handle shared with the engine
    cancel: Arc<AtomicBool>,
    /// Channel to the subscribing surface
    tx: mpsc::Sender<SorterMessage>,
}

impl SortController {
    /// Create a controller that reports through the given sender
    #[must_use]
    pub fn new(config: SorterConfig, tx: mpsc::Sender<SorterMessage>) -> Self {
        let engine = AnimatedQuicksort::new();
        let cancel = engine.cancel_handle();
        Self {
            config,
            store: Arc::new(Mutex::new(SequenceStore::new())),
            engine: Arc::new(Mutex::new(engine)),
            busy: Arc::new(AtomicBool::new(false)),
            cancel,
            tx,
        }
    }

    /// Create a controller together with the receiving end of its
    /// outbound channel, sized from the configuration
    #[must_use]
    pub fn channel(config: SorterConfig) -> (Self, mpsc::Receiver<SorterMessage>) {
        let (tx, rx) = mpsc::channel(config.channel_capacity);
        (Self::new(config, tx), rx)
    }

    /// Dispatch a surface request to the matching operation
    ///
    /// # Errors
    ///
    /// Forwards the error of the dispatched operation.
    pub async fn handle_request(&self, request: SurfaceRequest) -> Result<(), SortError> {
        match request {
            SurfaceRequest::Generate {
                count,
                small_bound,
                large_bound,
            } => {
                self.request_generate_with_bounds(count, small_bound, large_bound)
                    .await
            }
            SurfaceRequest::Sort => self.request_sort().await.map(|_| ()),
            SurfaceRequest::Reset => self.request_reset().await,
            SurfaceRequest::DrillDown { index } => self.request_drill_down(index).await,
            SurfaceRequest::Cancel => {
                self.request_cancel();
                Ok(())
            }
        }
    }

    /// Replace the dataset with `count` fresh numbers using the
    /// configured bounds
    ///
    /// # Errors
    ///
    /// [`SortError::ConcurrentSortInProgress`] while a sort is in flight,
    /// [`SortError::InvalidArgument`] on a non-positive count.
    pub async fn request_generate(&self, count: usize) -> Result<(), SortError> {
        self.request_generate_with_bounds(count, self.config.small_bound, self.config.large_bound)
            .await
    }

    /// Replace the dataset with `count` fresh numbers using explicit
    /// bounds
    ///
    /// # Errors
    ///
    /// [`SortError::ConcurrentSortInProgress`] while a sort is in flight,
    /// [`SortError::InvalidArgument`] on a non-positive count or bounds.
    pub async fn request_generate_with_bounds(
        &self,
        count: usize,
        small_bound: i32,
        large_bound: i32,
    ) -> Result<(), SortError> {
        self.ensure_idle()?;

        let values = {
            let mut store = self.store.lock();
            store.generate(count, small_bound, large_bound)?;
            store.snapshot()
        };
        self.engine.lock().reset();

        info!(count, "dataset regenerated");
        let _ = self
            .tx
            .send(SorterMessage::DatasetReplaced { values })
            .await;
        Ok(())
    }

    /// Sort the dataset in the background, flipping the direction of the
    /// previous run. Returns the direction of this run as soon as the
    /// worker is spawned; progress arrives on the message channel.
    ///
    /// # Errors
    ///
    /// [`SortError::ConcurrentSortInProgress`] while another sort is in
    /// flight.
    pub async fn request_sort(&self) -> Result<SortDirection, SortError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("sort requested while another sort is in flight");
            return Err(SortError::ConcurrentSortInProgress);
        }

        let direction = self.engine.lock().next_direction();
        info!(%direction, "starting sort");
        let _ = self.tx.send(SorterMessage::SortStarted { direction }).await;

        let store = Arc::clone(&self.store);
        let engine = Arc::clone(&self.engine);
        let busy = Arc::clone(&self.busy);
        let tx = self.tx.clone();
        let step_delay = self.config.step_delay;

        tokio::task::spawn_blocking(move || {
            let mut engine = engine.lock();
            let mut store = store.lock();

            let result = engine.run_sort(&mut store, |event| {
                let pace = !step_delay.is_zero() && !event.is_terminal();
                let _ = tx.blocking_send(SorterMessage::Observation(event));
                if pace {
                    std::thread::sleep(step_delay);
                }
            });

            match result {
                Ok(outcome) => info!(?outcome, "sort finished"),
                Err(ref err) => {
                    error!(error = %err, "sort failed");
                    let _ = tx.blocking_send(SorterMessage::SortFailed {
                        error: err.to_string(),
                    });
                }
            }

            drop(store);
            drop(engine);
            busy.store(false, Ordering::SeqCst);
        });

        Ok(direction)
    }

    /// Discard the dataset and all direction/state history
    ///
    /// # Errors
    ///
    /// [`SortError::ConcurrentSortInProgress`] while a sort is in flight.
    pub async fn request_reset(&self) -> Result<(), SortError> {
        self.ensure_idle()?;

        self.store.lock().clear();
        self.engine.lock().reset();

        info!("store and engine reset");
        let _ = self
            .tx
            .send(SorterMessage::DatasetReplaced { values: Vec::new() })
            .await;
        Ok(())
    }

    /// Drill down on the element at `index`: when its value is at or
    /// below the small bound, regenerate a dataset sized to that value.
    ///
    /// # Errors
    ///
    /// [`SortError::ConcurrentSortInProgress`] while a sort is in flight,
    /// [`SortError::IndexOutOfRange`] for a stale index, and
    /// [`SortError::InvalidArgument`] when the clicked value exceeds the
    /// small bound.
    pub async fn request_drill_down(&self, index: usize) -> Result<(), SortError> {
        self.ensure_idle()?;

        let value = self.store.lock().read(index)?;
        if value > self.config.small_bound {
            warn!(index, value, "drill-down rejected, value above small bound");
            return Err(SortError::invalid(format!(
                "value {value} at index {index} exceeds the drill-down limit {}",
                self.config.small_bound
            )));
        }
        let count = usize::try_from(value)
            .map_err(|_| SortError::invalid(format!("value {value} cannot size a dataset")))?;

        info!(index, count, "drilling down");
        self.request_generate(count).await
    }

    /// Cooperatively cancel the in-flight sort (no-op when idle).
    ///
    /// The worker stops at its next step check and reports
    /// [`ObservationEvent::Cancelled`](crate::events::ObservationEvent::Cancelled)
    /// as the terminal event.
    pub fn request_cancel(&self) {
        if self.busy.load(Ordering::SeqCst) {
            info!("cancellation requested");
        }
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Whether a background sort is currently in flight
    #[must_use]
    pub fn is_sorting(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Copy of the current dataset
    #[must_use]
    pub fn snapshot(&self) -> Vec<i32> {
        self.store.lock().snapshot()
    }

    /// Ordered-ness of the dataset as the engine last left it
    #[must_use]
    pub fn sort_state(&self) -> SortState {
        self.engine.lock().state()
    }

    /// Direction of the last run, if any sort happened since the last
    /// regeneration
    #[must_use]
    pub fn last_direction(&self) -> Option<SortDirection> {
        self.engine.lock().last_direction()
    }

    /// Reject store mutations while a sort is in flight
    fn ensure_idle(&self) -> Result<(), SortError> {
        if self.busy.load(Ordering::SeqCst) {
            warn!("request rejected, a sort is in flight");
            return Err(SortError::ConcurrentSortInProgress);
        }
        Ok(())
    }
}
