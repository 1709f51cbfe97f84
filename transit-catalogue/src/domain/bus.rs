//! Bus route types and their derived statistics.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinates, StopIndex};

/// Index of a bus in catalogue insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusIndex(pub usize);

impl fmt::Display for BusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Statistics computed once when a bus is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStats {
    /// Stops visited along the whole route, counting repeats.
    pub stop_count: usize,
    /// Distinct stops on the route.
    pub unique_stop_count: usize,
    /// Great-circle route length in meters.
    pub length_direct: f64,
    /// Road route length in meters.
    pub length_traveled: u64,
    /// `length_traveled / length_direct`, or 0 when the direct length is 0.
    pub curvature: f64,
}

impl BusStats {
    /// Compute statistics for a stop sequence.
    ///
    /// A linear route is traveled forward then back, so its stop count is
    /// `2 * len - 1`, its direct length is doubled, and its road length adds
    /// the directed distances of the return pass (which may differ from the
    /// outbound ones).
    ///
    /// # Arguments
    ///
    /// * `stops` - The stop sequence; must be non-empty
    /// * `is_circular` - Whether the route returns to its start on its own
    /// * `coordinates` - Lookup for a stop's position
    /// * `distance` - Directed road distance between two stops in meters
    pub fn compute<C, D>(stops: &[StopIndex], is_circular: bool, coordinates: C, distance: D) -> Self
    where
        C: Fn(StopIndex) -> Coordinates,
        D: Fn(StopIndex, StopIndex) -> u32,
    {
        let unique_stop_count = stops.iter().collect::<HashSet<_>>().len();

        let mut length_direct = 0.0;
        let mut length_traveled: u64 = 0;
        for pair in stops.windows(2) {
            length_direct += coordinates(pair[0]).distance_to(&coordinates(pair[1]));
            length_traveled += u64::from(distance(pair[0], pair[1]));
        }

        let stop_count = if is_circular {
            stops.len()
        } else {
            length_direct *= 2.0;
            for pair in stops.windows(2).rev() {
                length_traveled += u64::from(distance(pair[1], pair[0]));
            }
            (stops.len() * 2).saturating_sub(1)
        };

        let curvature = if length_direct > 0.0 {
            length_traveled as f64 / length_direct
        } else {
            0.0
        };

        Self {
            stop_count,
            unique_stop_count,
            length_direct,
            length_traveled,
            curvature,
        }
    }
}

/// A named route over an ordered sequence of stops.
///
/// Immutable once created: the catalogue never edits an existing bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    index: BusIndex,
    name: String,
    stops: Vec<StopIndex>,
    is_circular: bool,
    stats: BusStats,
}

impl Bus {
    pub(crate) fn new(
        index: BusIndex,
        name: String,
        stops: Vec<StopIndex>,
        is_circular: bool,
        stats: BusStats,
    ) -> Self {
        Self {
            index,
            name,
            stops,
            is_circular,
            stats,
        }
    }

    pub fn index(&self) -> BusIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop sequence as supplied; a linear route's return pass is implied.
    pub fn stops(&self) -> &[StopIndex] {
        &self.stops
    }

    pub fn is_circular(&self) -> bool {
        self.is_circular
    }

    pub fn stats(&self) -> &BusStats {
        &self.stats
    }
}
