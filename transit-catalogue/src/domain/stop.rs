//! Stop types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Dense index of a stop, assigned in insertion order.
///
/// Stop indices double as graph vertex ids, so they are always in
/// `0..stop_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StopIndex(pub usize);

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

/// A named geographic point that buses may visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    index: StopIndex,
    name: String,
    coordinates: Coordinates,
    /// Names of the buses calling here, kept sorted.
    buses: BTreeSet<String>,
}

impl Stop {
    pub(crate) fn new(index: StopIndex, name: String, coordinates: Coordinates) -> Self {
        Self {
            index,
            name,
            coordinates,
            buses: BTreeSet::new(),
        }
    }

    pub fn index(&self) -> StopIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Bus names visiting this stop, in ascending order.
    pub fn buses(&self) -> &BTreeSet<String> {
        &self.buses
    }

    /// Returns true if at least one bus calls here.
    ///
    /// A stop without buses can never be the endpoint of a routed journey.
    pub fn is_served(&self) -> bool {
        !self.buses.is_empty()
    }

    pub(crate) fn register_bus(&mut self, bus: &str) {
        if !self.buses.contains(bus) {
            self.buses.insert(bus.to_string());
        }
    }
}
