//! Sorter Configuration
//!
//! Pacing, channel sizing, and generation bounds for the sorting core.
//! All values have interactive-demo defaults and can be overridden from
//! the environment or through the builder-style setters.

use std::time::Duration;

/// Default upper bound of the guaranteed small element
pub const DEFAULT_SMALL_BOUND: i32 = 30;

/// Default upper bound of all other generated elements
pub const DEFAULT_LARGE_BOUND: i32 = 1000;

/// Default pacing delay between animated steps
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// Default capacity of the outbound message channel
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Configuration for the sorting core
#[derive(Clone, Debug)]
pub struct SorterConfig {
    /// Delay inserted between observable steps of a background sort.
    /// Zero disables pacing entirely.
    pub step_delay: Duration,
    /// Capacity of the outbound [`SorterMessage`] channel created by
    /// [`SortController::channel`]
    ///
    /// [`SorterMessage`]: crate::messages::SorterMessage
    /// [`SortController::channel`]: crate::controller::SortController::channel
    pub channel_capacity: usize,
    /// Upper bound of the guaranteed small element on generation, and the
    /// largest value the drill-down interaction accepts
    pub small_bound: i32,
    /// Upper bound of all other generated elements
    pub large_bound: i32,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            small_bound: DEFAULT_SMALL_BOUND,
            large_bound: DEFAULT_LARGE_BOUND,
        }
    }
}

impl SorterConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration without pacing (for tests and headless
    /// batch runs)
    #[must_use]
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the pacing delay between animated steps
    #[must_use]
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Set the outbound channel capacity
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the small-element bound
    #[must_use]
    pub fn with_small_bound(mut self, bound: i32) -> Self {
        self.small_bound = bound;
        self
    }

    /// Set the large-element bound
    #[must_use]
    pub fn with_large_bound(mut self, bound: i32) -> Self {
        self.large_bound = bound;
        self
    }

    /// Create configuration from environment variables
    ///
    /// - `SORTER_STEP_DELAY_MS`: pacing delay in milliseconds
    /// - `SORTER_CHANNEL_CAPACITY`: outbound channel capacity
    /// - `SORTER_SMALL_BOUND`: small-element bound
    /// - `SORTER_LARGE_BOUND`: large-element bound
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            step_delay: std::env::var("SORTER_STEP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.step_delay, Duration::from_millis),
            channel_capacity: std::env::var("SORTER_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.channel_capacity),
            small_bound: std::env::var("SORTER_SMALL_BOUND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.small_bound),
            large_bound: std::env::var("SORTER_LARGE_BOUND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.large_bound),
        }
    }
}
