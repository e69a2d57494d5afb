//! Observation Events
//!
//! Events emitted by the sorting engine while it works, in the exact
//! program order of the quicksort (pivot placement first, then the left
//! subrange, then the right). A renderer subscribes to these to animate
//! progress; it never mutates engine state.
//!
//! # Design Philosophy
//!
//! Events carry copies of the relevant values, never references into the
//! live array. That keeps the engine and any observer free of shared
//! mutable state: the observer can run on a different thread (the
//! background execution model hands events over a channel) without any
//! coordination beyond the hand-off itself.

use serde::{Deserialize, Serialize};

/// A discrete, observable step of an in-flight sort
///
/// The engine produces these; the presentation side consumes them. The
/// stream for one sort always ends with exactly one terminal event
/// ([`SortComplete`](Self::SortComplete) or
/// [`Cancelled`](Self::Cancelled)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationEvent {
    /// A pivot was selected for the subrange being partitioned.
    ///
    /// `index` is the pivot's pre-partition resting place (the high end
    /// of the subrange, where the randomly chosen pivot value is moved
    /// before partitioning starts).
    PivotChosen {
        /// Index holding the pivot for the upcoming partition round
        index: usize,
    },

    /// Two positions exchanged their values.
    ///
    /// Emitted for every swap the engine performs, including benign
    /// self-swaps (`i == j`, where `before` equals `after`). The carried
    /// values let a renderer animate the exchange without reading the
    /// live array.
    RangeSwapped {
        /// First index of the exchange
        i: usize,
        /// Second index of the exchange
        j: usize,
        /// Values at `(i, j)` before the exchange
        before: (i32, i32),
        /// Values at `(i, j)` after the exchange
        after: (i32, i32),
    },

    /// The sort ran to completion; the sequence is fully ordered
    SortComplete,

    /// The sort stopped at a cancellation point; the sequence is left in
    /// whatever partial state it reached (no rollback)
    Cancelled,
}

impl ObservationEvent {
    /// Whether this event ends the stream for the current sort
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SortComplete | Self::Cancelled)
    }
}
