//! Sequence Store
//!
//! Owns the mutable integer sequence being sorted and generates fresh
//! randomized datasets. All reads and writes are bounds-checked; nothing
//! outside this module holds a reference into the live array (observers
//! only ever see copies).
//!
//! # Design Philosophy
//!
//! The store is deliberately dumb: it knows nothing about sorting,
//! directions, or observation events. Emitting a [`RangeSwapped`] event
//! for a swap is the engine's job, which keeps the store reusable from
//! both execution models (synchronous and background) without threading
//! a callback through every accessor.
//!
//! [`RangeSwapped`]: crate::events::ObservationEvent::RangeSwapped

use rand::Rng;

use crate::error::SortError;

/// Owns the integer sequence and its randomized regeneration.
///
/// A fresh dataset replaces the contents entirely; the previous array is
/// discarded. Sorting state (direction, sorted-ness) lives in the engine,
/// not here.
#[derive(Clone, Debug, Default)]
pub struct SequenceStore {
    /// The live sequence. Only mutated through `generate`, `swap`, and
    /// `clear`.
    values: Vec<i32>,
}

impl SequenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an existing dataset.
    ///
    /// Takes ownership of the values, so no outside alias into the live
    /// array survives. Mostly useful for tests and embedders that bring
    /// their own data instead of using [`generate`](Self::generate).
    #[must_use]
    pub fn from_values(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Replace the contents with a fresh randomized dataset.
    ///
    /// Draws `count` integers uniformly from `[1, large_bound]`, then
    /// overwrites one uniformly chosen index with a value drawn from
    /// `[1, small_bound]`. This guarantees at least one "small" element
    /// exists, which the drill-down interaction relies on; other elements
    /// may also land below the small bound by chance.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::InvalidArgument`] when `count` is zero or
    /// either bound is below 1.
    pub fn generate(
        &mut self,
        count: usize,
        small_bound: i32,
        large_bound: i32,
    ) -> Result<(), SortError> {
        if count < 1 {
            return Err(SortError::invalid("count must be at least 1"));
        }
        if small_bound < 1 || large_bound < 1 {
            return Err(SortError::invalid(format!(
                "bounds must be positive (small: {small_bound}, large: {large_bound})"
            )));
        }

        let mut rng = rand::thread_rng();
        let mut values: Vec<i32> = (0..count).map(|_| rng.gen_range(1..=large_bound)).collect();

        // Plant the guaranteed small element at a random index.
        let small_index = rng.gen_range(0..count);
        values[small_index] = rng.gen_range(1..=small_bound);

        self.values = values;
        Ok(())
    }

    /// Read the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::IndexOutOfRange`] when `index` is outside
    /// `[0, len)`.
    pub fn read(&self, index: usize) -> Result<i32, SortError> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| SortError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Exchange the values at `i` and `j`. A self-swap (`i == j`) is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::IndexOutOfRange`] when either index is
    /// outside `[0, len)`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), SortError> {
        let len = self.values.len();
        for index in [i, j] {
            if index >= len {
                return Err(SortError::IndexOutOfRange { index, len });
            }
        }
        if i != j {
            self.values.swap(i, j);
        }
        Ok(())
    }

    /// Number of elements in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store currently holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of the current sequence, for renderers and assertions.
    ///
    /// Observers never receive references into the live array.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i32> {
        self.values.clone()
    }

    /// Discard the current dataset entirely
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rejects_zero_count() {
        let mut store = SequenceStore::new();
        assert_eq!(
            store.generate(0, 30, 1000),
            Err(SortError::invalid("count must be at least 1"))
        );
    }

    #[test]
    fn test_generate_rejects_non_positive_bounds() {
        let mut store = SequenceStore::new();
        assert!(store.generate(5, 0, 1000).is_err());
        assert!(store.generate(5, 30, 0).is_err());
        assert!(store.generate(5, -3, 1000).is_err());
    }

    #[test]
    fn test_generate_shape() {
        let mut store = SequenceStore::new();
        store.generate(40, 30, 1000).unwrap();

        let values = store.snapshot();
        assert_eq!(values.len(), 40);
        assert!(
            values.iter().all(|&v| (1..=1000).contains(&v)),
            "all values must lie in [1, large_bound]"
        );
        assert!(
            values.iter().any(|&v| v <= 30),
            "at least one planted small element must exist"
        );
    }

    #[test]
    fn test_generate_replaces_previous_dataset() {
        let mut store = SequenceStore::new();
        store.generate(10, 30, 1000).unwrap();
        store.generate(3, 30, 1000).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_single_element_dataset() {
        let mut store = SequenceStore::new();
        store.generate(1, 30, 1000).unwrap();
        assert_eq!(store.len(), 1);
        // The only element is the planted small one.
        assert!(store.read(0).unwrap() <= 30);
    }

    #[test]
    fn test_read_bounds() {
        let mut store = SequenceStore::new();
        store.generate(3, 30, 1000).unwrap();
        assert!(store.read(2).is_ok());
        assert_eq!(
            store.read(3),
            Err(SortError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_swap_exchanges_and_self_swap_is_noop() {
        let mut store = SequenceStore::new();
        store.generate(5, 30, 1000).unwrap();
        let before = store.snapshot();

        store.swap(0, 4).unwrap();
        assert_eq!(store.read(0).unwrap(), before[4]);
        assert_eq!(store.read(4).unwrap(), before[0]);

        store.swap(2, 2).unwrap();
        assert_eq!(store.read(2).unwrap(), before[2]);
    }

    #[test]
    fn test_swap_bounds() {
        let mut store = SequenceStore::new();
        store.generate(2, 30, 1000).unwrap();
        assert_eq!(
            store.swap(0, 2),
            Err(SortError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            store.swap(9, 1),
            Err(SortError::IndexOutOfRange { index: 9, len: 2 })
        );
    }

    #[test]
    fn test_clear() {
        let mut store = SequenceStore::new();
        store.generate(4, 30, 1000).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.read(0).is_err());
    }
}
