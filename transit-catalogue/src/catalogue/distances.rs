//! Directed road distances between stops.

use std::collections::HashMap;

use crate::domain::StopIndex;

/// Road distances in meters, keyed by ordered stop pair.
///
/// Only explicitly supplied pairs are stored. Lookups fall back to the
/// reverse direction when the forward pair is missing, and to 0 when
/// neither is known.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(StopIndex, StopIndex), u32>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the distance from `from` to `to`. Does not imply the reverse.
    ///
    /// A later call for the same ordered pair replaces the earlier value.
    pub fn insert(&mut self, from: StopIndex, to: StopIndex, meters: u32) {
        self.entries.insert((from, to), meters);
    }

    /// Distance from `from` to `to`: forward entry, else reverse entry, else 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_catalogue::catalogue::DistanceTable;
    /// use transit_catalogue::domain::StopIndex;
    ///
    /// let mut table = DistanceTable::new();
    /// table.insert(StopIndex(0), StopIndex(1), 3900);
    ///
    /// assert_eq!(table.get(StopIndex(0), StopIndex(1)), 3900);
    /// assert_eq!(table.get(StopIndex(1), StopIndex(0)), 3900);
    /// assert_eq!(table.get(StopIndex(0), StopIndex(2)), 0);
    /// ```
    pub fn get(&self, from: StopIndex, to: StopIndex) -> u32 {
        self.entries
            .get(&(from, to))
            .or_else(|| self.entries.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    /// The explicitly recorded entry for this exact ordered pair, if any.
    pub fn get_exact(&self, from: StopIndex, to: StopIndex) -> Option<u32> {
        self.entries.get(&(from, to)).copied()
    }

    /// All recorded entries as `(from, to, meters)`, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (StopIndex, StopIndex, u32)> + '_ {
        self.entries
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
