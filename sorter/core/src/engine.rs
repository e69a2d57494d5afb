//! Animated Quicksort Engine
//!
//! The sorting engine: an in-place, direction-aware quicksort that emits
//! an [`ObservationEvent`] for every observable step, supports cooperative
//! cancellation, and reuses prior work: a dataset already sorted in the
//! opposite direction is reversed in O(n) instead of re-sorted.
//!
//! # Design Philosophy
//!
//! The engine is the synchronous/stepped execution model: `run_sort`
//! executes on the caller's thread and invokes the observer callback
//! inline. Pacing is not its concern; the background worker inserts the
//! delay between steps. This keeps the algorithm testable without timers
//! and lets a stepping caller drive it at whatever rate it likes.
//!
//! Direction and sorted-state are explicit per-instance fields, not
//! globals. An engine is reusable across sorts; regenerating the dataset
//! resets it.
//!
//! # Partition scheme
//!
//! A uniformly random pivot is swapped to the high end of the subrange,
//! where it acts as a sentinel for a two-pointer pass: `left` advances
//! over elements that belong on the left of the pivot, `right` retreats
//! over elements that belong on the right, stalled pairs are exchanged,
//! and the pass repeats while `left < right`. A final comparison settles
//! whether the pivot lands at the meeting point or stays at the high end.
//! Subranges are traversed with an explicit stack (popped left-first, so
//! the event stream is the recursion's pre-order) rather than recursion,
//! bounding stack depth on adversarial inputs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SortError;
use crate::events::ObservationEvent;
use crate::store::SequenceStore;

/// Sort direction for a single run
///
/// Every sort request flips the direction of the previous run; a fresh
/// (or reset) engine sorts ascending first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest values first
    Ascending,
    /// Largest values first
    Descending,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    /// Whether `value` belongs on the left side of `pivot` for this
    /// direction (at or before the pivot's final position)
    #[must_use]
    pub fn belongs_left(self, value: i32, pivot: i32) -> bool {
        match self {
            Self::Ascending => value <= pivot,
            Self::Descending => value >= pivot,
        }
    }

    /// Whether `value` belongs on the right side of `pivot` for this
    /// direction
    #[must_use]
    pub fn belongs_right(self, value: i32, pivot: i32) -> bool {
        match self {
            Self::Ascending => value >= pivot,
            Self::Descending => value <= pivot,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered-ness of the store's sequence as the engine last left it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortState {
    /// No completed sort since the last reset or regeneration (also the
    /// state after a cancelled run, which leaves partial order behind)
    #[default]
    Unsorted,
    /// Fully ordered in the given direction
    Sorted(SortDirection),
}

impl SortState {
    /// Whether the sequence is fully ordered in some direction
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        matches!(self, Self::Sorted(_))
    }
}

/// Successful result of [`AnimatedQuicksort::run_sort`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOutcome {
    /// A full quicksort ran to completion (or the sequence was already
    /// ordered in the requested direction and nothing had to move)
    Sorted {
        /// Direction the sequence is now ordered in
        direction: SortDirection,
    },
    /// The sequence was already sorted the opposite way, so it was
    /// reversed in linear time instead of re-sorted
    Reversed {
        /// Direction the sequence is now ordered in
        direction: SortDirection,
    },
    /// The run stopped at a cancellation point; the sequence keeps its
    /// partial state and the engine is back to
    /// [`SortState::Unsorted`]
    Cancelled,
}

/// How a sorting pass ended (internal)
enum StepOutcome {
    Finished,
    Cancelled,
}

/// Result of a single partition round (internal)
enum PartitionOutcome {
    /// The pivot's final resting index
    Pivot(usize),
    Cancelled,
}

/// Which amount of work the current request needs (internal)
#[derive(Clone, Copy)]
enum Path {
    Full,
    Reverse,
    Noop,
}

/// Releases the in-flight flag on every exit path of a run
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SortError> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SortError::ConcurrentSortInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// The animated, direction-aware, interruptible quicksort engine.
///
/// Holds the direction/state machine across runs. At most one sort per
/// engine instance is in progress at any time; a second `run_sort` while
/// one is in flight fails fast with
/// [`SortError::ConcurrentSortInProgress`].
#[derive(Debug, Default)]
pub struct AnimatedQuicksort {
    /// Direction of the last run, `None` until the first sort after a
    /// reset. The next run uses `Ascending` when `None`, otherwise the
    /// toggle of this value.
    last_direction: Option<SortDirection>,
    /// Ordered-ness the engine last left the sequence in
    state: SortState,
    /// In-flight guard; set for the whole duration of a run
    in_flight: AtomicBool,
    /// Cooperative cancellation flag, checked between observable steps
    cancel: Arc<AtomicBool>,
}

impl AnimatedQuicksort {
    /// Create a fresh engine (unsorted, first sort ascending)
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_direction: None,
            state: SortState::Unsorted,
            in_flight: AtomicBool::new(false),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Forget all direction/state history, as after a dataset
    /// regeneration. The next sort runs a full quicksort, ascending.
    pub fn reset(&mut self) {
        self.last_direction = None;
        self.state = SortState::Unsorted;
    }

    /// Current ordered-ness of the sequence
    #[must_use]
    pub fn state(&self) -> SortState {
        self.state
    }

    /// Direction of the last completed-or-cancelled run, if any
    #[must_use]
    pub fn last_direction(&self) -> Option<SortDirection> {
        self.last_direction
    }

    /// Direction the next `run_sort` call will use
    #[must_use]
    pub fn next_direction(&self) -> SortDirection {
        match self.last_direction {
            None => SortDirection::Ascending,
            Some(direction) => direction.toggled(),
        }
    }

    /// Handle for requesting cancellation from another thread.
    ///
    /// Setting the flag stops an in-flight run at its next step check;
    /// `run_sort` clears the flag when a new run begins.
    #[must_use]
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Request cancellation of the in-flight run (no-op when idle)
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Sort the store's sequence, flipping the direction of the previous
    /// run and emitting an [`ObservationEvent`] for every observable
    /// step.
    ///
    /// A full quicksort runs only when the sequence is
    /// [`SortState::Unsorted`]; a sequence already sorted the opposite
    /// way is reversed in linear time instead. The event stream ends with
    /// exactly one terminal event (`SortComplete` or `Cancelled`).
    ///
    /// # Errors
    ///
    /// - [`SortError::ConcurrentSortInProgress`] when a run is already in
    ///   flight on this instance.
    /// - [`SortError::IndexOutOfRange`] only on an engine bug; the
    ///   sequence state is then unspecified and the engine keeps its
    ///   previous direction/state history.
    pub fn run_sort<F>(
        &mut self,
        store: &mut SequenceStore,
        mut on_event: F,
    ) -> Result<SortOutcome, SortError>
    where
        F: FnMut(ObservationEvent),
    {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.cancel.store(false, Ordering::SeqCst);

        let direction = self.next_direction();
        let path = match self.state {
            SortState::Unsorted => Path::Full,
            SortState::Sorted(prior) if prior != direction => Path::Reverse,
            SortState::Sorted(_) => Path::Noop,
        };

        let run = match path {
            Path::Full => self.quicksort(store, direction, &mut on_event)?,
            Path::Reverse => self.reverse(store, &mut on_event)?,
            Path::Noop => StepOutcome::Finished,
        };

        // The toggle is consumed even by a cancelled run: every request
        // flips, regardless of how the previous one ended.
        self.last_direction = Some(direction);

        match run {
            StepOutcome::Cancelled => {
                self.state = SortState::Unsorted;
                on_event(ObservationEvent::Cancelled);
                Ok(SortOutcome::Cancelled)
            }
            StepOutcome::Finished => {
                self.state = SortState::Sorted(direction);
                on_event(ObservationEvent::SortComplete);
                Ok(match path {
                    Path::Reverse => SortOutcome::Reversed { direction },
                    Path::Full | Path::Noop => SortOutcome::Sorted { direction },
                })
            }
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Full in-place quicksort over `[0, len - 1]`, explicit range stack
    fn quicksort<F>(
        &self,
        store: &mut SequenceStore,
        direction: SortDirection,
        on_event: &mut F,
    ) -> Result<StepOutcome, SortError>
    where
        F: FnMut(ObservationEvent),
    {
        if store.len() < 2 {
            return Ok(StepOutcome::Finished);
        }

        let mut ranges = vec![(0, store.len() - 1)];
        while let Some((low, high)) = ranges.pop() {
            if self.cancelled() {
                return Ok(StepOutcome::Cancelled);
            }
            if low >= high {
                continue;
            }

            let pivot = match self.partition(store, low, high, direction, on_event)? {
                PartitionOutcome::Pivot(index) => index,
                PartitionOutcome::Cancelled => return Ok(StepOutcome::Cancelled),
            };

            // Right subrange is pushed first so the left one is popped
            // (and animated) next: pre-order event stream.
            if pivot + 1 < high {
                ranges.push((pivot + 1, high));
            }
            if pivot > low + 1 {
                ranges.push((low, pivot - 1));
            }
        }

        Ok(StepOutcome::Finished)
    }

    /// One partition round over `[low, high]`, `low < high`.
    ///
    /// Picks a uniformly random pivot, parks it at `high`, runs the
    /// two-pointer pass, and settles the pivot's final index.
    fn partition<F>(
        &self,
        store: &mut SequenceStore,
        low: usize,
        high: usize,
        direction: SortDirection,
        on_event: &mut F,
    ) -> Result<PartitionOutcome, SortError>
    where
        F: FnMut(ObservationEvent),
    {
        let pivot_index = rand::thread_rng().gen_range(low..=high);
        on_event(ObservationEvent::PivotChosen { index: high });
        swap_and_emit(store, pivot_index, high, on_event)?;
        let pivot = store.read(high)?;

        let mut left = low;
        let mut right = high - 1;
        while left < right {
            if self.cancelled() {
                return Ok(PartitionOutcome::Cancelled);
            }
            while left < right && direction.belongs_left(store.read(left)?, pivot) {
                left += 1;
            }
            while left < right && direction.belongs_right(store.read(right)?, pivot) {
                right -= 1;
            }
            // Benign self-swap when the pointers met.
            swap_and_emit(store, left, right, on_event)?;
        }

        if self.cancelled() {
            return Ok(PartitionOutcome::Cancelled);
        }

        // The meeting point either takes the pivot or already belongs
        // left of it, in which case the pivot rests where it was parked.
        let final_index = if direction.belongs_left(store.read(left)?, pivot) {
            high
        } else {
            swap_and_emit(store, left, high, on_event)?;
            left
        };
        Ok(PartitionOutcome::Pivot(final_index))
    }

    /// Linear-time reversal for a sequence already sorted the other way
    fn reverse<F>(
        &self,
        store: &mut SequenceStore,
        on_event: &mut F,
    ) -> Result<StepOutcome, SortError>
    where
        F: FnMut(ObservationEvent),
    {
        let len = store.len();
        for i in 0..len / 2 {
            if self.cancelled() {
                return Ok(StepOutcome::Cancelled);
            }
            swap_and_emit(store, i, len - 1 - i, on_event)?;
        }
        Ok(StepOutcome::Finished)
    }
}

/// Exchange two positions through the store and emit the corresponding
/// [`ObservationEvent::RangeSwapped`] with before/after value copies.
fn swap_and_emit<F>(
    store: &mut SequenceStore,
    i: usize,
    j: usize,
    on_event: &mut F,
) -> Result<(), SortError>
where
    F: FnMut(ObservationEvent),
{
    let before = (store.read(i)?, store.read(j)?);
    store.swap(i, j)?;
    let after = (store.read(i)?, store.read(j)?);
    on_event(ObservationEvent::RangeSwapped { i, j, before, after });
    Ok(())
}
