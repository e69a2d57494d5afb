//! Surface Requests
//!
//! Requests sent from a UI surface to the sorting core. These represent
//! all the ways a surface can ask for work; the core decides how to
//! respond and reports back through [`SorterMessage`] and the
//! observation-event stream.
//!
//! # Design Philosophy
//!
//! Surfaces are dumb renderers. They forward what the user did (asked for
//! a dataset, pressed sort, clicked a number) without interpreting it;
//! validation, busy-gating, and the direction toggle all live in the
//! core.
//!
//! [`SorterMessage`]: crate::messages::SorterMessage

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LARGE_BOUND, DEFAULT_SMALL_BOUND};

/// Requests from a UI surface to the sorting core
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceRequest {
    /// Replace the dataset with `count` fresh random numbers.
    ///
    /// The bounds default to the documented interactive values (30 /
    /// 1000) when a surface omits them.
    Generate {
        /// How many numbers to generate
        count: usize,
        /// Upper bound of the guaranteed small element
        #[serde(default = "default_small_bound")]
        small_bound: i32,
        /// Upper bound of all other elements
        #[serde(default = "default_large_bound")]
        large_bound: i32,
    },

    /// Sort the current dataset, flipping the direction of the previous
    /// run
    Sort,

    /// Discard the dataset and all direction/state history
    Reset,

    /// Drill down on the value at `index`: when it is at or below the
    /// small bound, regenerate a dataset sized to that value
    DrillDown {
        /// Index of the clicked element
        index: usize,
    },

    /// Cooperatively cancel the in-flight sort, if any
    Cancel,
}

fn default_small_bound() -> i32 {
    DEFAULT_SMALL_BOUND
}

fn default_large_bound() -> i32 {
    DEFAULT_LARGE_BOUND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bounds_default_when_omitted() {
        let request: SurfaceRequest =
            serde_json::from_str(r#"{"Generate":{"count":12}}"#).unwrap();
        assert_eq!(
            request,
            SurfaceRequest::Generate {
                count: 12,
                small_bound: 30,
                large_bound: 1000,
            }
        );
    }

    #[test]
    fn test_generate_bounds_can_be_overridden() {
        let request: SurfaceRequest = serde_json::from_str(
            r#"{"Generate":{"count":5,"small_bound":10,"large_bound":50}}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            SurfaceRequest::Generate {
                count: 5,
                small_bound: 10,
                large_bound: 50,
            }
        );
    }
}
