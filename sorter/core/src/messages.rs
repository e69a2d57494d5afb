//! Sorter Messages
//!
//! Messages sent from the sorting core to a UI surface. The surface
//! should not carry any business logic; it just renders what it is told:
//! the current dataset, the fact that a sort started, and each observable
//! sorting step.

use serde::{Deserialize, Serialize};

use crate::engine::SortDirection;
use crate::events::ObservationEvent;

/// Messages from the sorting core to a UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SorterMessage {
    /// The dataset was replaced (generation, drill-down, or reset).
    ///
    /// Carries a full copy of the new values so the surface can draw the
    /// initial grid without reaching into the live array. Empty after a
    /// reset.
    DatasetReplaced {
        /// The new dataset, in display order
        values: Vec<i32>,
    },

    /// A sort was accepted and its background run is starting
    SortStarted {
        /// Direction this run sorts in
        direction: SortDirection,
    },

    /// One observable step of the in-flight sort
    Observation(ObservationEvent),

    /// The background run failed with an engine error.
    ///
    /// This only happens on an engine bug (a bounds violation inside the
    /// sort); it is surfaced rather than swallowed so a surface can show
    /// something other than a silently stuck animation.
    SortFailed {
        /// Error description
        error: String,
    },
}
