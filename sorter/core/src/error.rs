//! Sorting Error Taxonomy
//!
//! All failure modes of the core are returned as explicit values to the
//! caller; nothing is swallowed and nothing panics in library code. The
//! collaborating surface translates these into user-visible messages.
//!
//! Cancellation is deliberately absent here: a cancelled sort is a normal
//! outcome ([`SortOutcome::Cancelled`](crate::engine::SortOutcome)), not
//! an error.

use thiserror::Error;

/// Errors produced by the sorting core
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SortError {
    /// A request carried an argument the core cannot act on
    /// (non-positive count or bounds, drill-down on a value above the
    /// small bound). Reported to the caller; never retried internally.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of the rejected argument
        reason: String,
    },

    /// A sequence access fell outside `[0, len)`.
    ///
    /// The engine drives every access through bounds-checked store
    /// operations, so seeing this from a sort means an engine bug, not a
    /// recoverable condition. It is still propagated (never unwrapped) so
    /// the worker can surface it instead of tearing the process down.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the sequence at the time of access
        len: usize,
    },

    /// A sort was requested (or the store was about to be mutated) while
    /// another sort is still in flight. Caller-recoverable: show a busy
    /// message and retry once the current sort finishes.
    #[error("a sort is already in progress")]
    ConcurrentSortInProgress,
}

impl SortError {
    /// Convenience constructor for [`SortError::InvalidArgument`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
