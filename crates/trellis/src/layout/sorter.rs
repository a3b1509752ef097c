//! Deterministic processing order for layout phases.

use log::warn;

use crate::LayoutError;

/// Bounded, stable ranking of indices by ascending weight.
///
/// Entries with equal weight keep their insertion order, so the same input
/// always yields the same processing order.
///
/// # Examples
///
/// ```
/// # use trellis::layout::IndexSorter;
/// let mut sorter = IndexSorter::with_capacity(4);
/// for (index, weight) in [(0, 5.0), (1, 2.0), (2, 2.0), (3, 9.0)] {
///     sorter.insert(index, weight).expect("within capacity");
/// }
/// assert_eq!(sorter.iter().collect::<Vec<_>>(), vec![1, 2, 0, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct IndexSorter {
    capacity: usize,
    entries: Vec<(usize, f64)>,
}

impl IndexSorter {
    /// Creates an empty sorter holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `index` with the given weight.
    ///
    /// NaN weights rank after every other weight.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::CapacityExceeded`] if the sorter is full; the
    /// entry is dropped and the existing order stays valid.
    pub fn insert(&mut self, index: usize, weight: f64) -> Result<(), LayoutError> {
        if self.entries.len() >= self.capacity {
            return Err(LayoutError::CapacityExceeded {
                what: "sorter entries",
                capacity: self.capacity,
            });
        }
        let weight = if weight.is_nan() { f64::INFINITY } else { weight };
        // Insert after all entries of lower or equal weight.
        let position = self
            .entries
            .partition_point(|&(_, existing)| existing <= weight);
        self.entries.insert(position, (index, weight));
        Ok(())
    }

    /// Inserts like [`IndexSorter::insert`], logging a dropped entry instead of failing
    pub fn insert_or_warn(&mut self, index: usize, weight: f64) {
        if let Err(err) = self.insert(index, weight) {
            warn!(index, err:% = err; "Entry dropped from processing order");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original index of the entry at `rank`
    pub fn get(&self, rank: usize) -> Option<usize> {
        self.entries.get(rank).map(|&(index, _)| index)
    }

    /// Original indices in ascending weight order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(index, _)| index)
    }
}
