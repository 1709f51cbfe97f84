//! The transport catalogue: stops, buses and road distances.
//!
//! The catalogue is filled in a fixed order (all stops, then all
//! distances, then all buses) because a bus's statistics are computed
//! from stop positions and distances at the moment it is added. After
//! the build phase it is only ever read.

mod distances;

use std::collections::HashMap;

use tracing::trace;

pub use distances::DistanceTable;

use crate::domain::{Bus, BusIndex, BusStats, CatalogueError, Coordinates, Stop, StopIndex};

/// Arena of stops and buses with name lookup tables.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_ids: HashMap<String, StopIndex>,
    buses: Vec<Bus>,
    bus_ids: HashMap<String, BusIndex>,
    distances: DistanceTable,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, assigning it the next sequential index.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStop` if a stop with this name already exists.
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) -> Result<StopIndex, CatalogueError> {
        if self.stop_ids.contains_key(name) {
            return Err(CatalogueError::DuplicateStop(name.to_string()));
        }

        let index = StopIndex(self.stops.len());
        self.stops.push(Stop::new(index, name.to_string(), coordinates));
        self.stop_ids.insert(name.to_string(), index);
        trace!(stop = name, %index, "added stop");
        Ok(index)
    }

    /// Record the directed road distance between two stops.
    pub fn add_distance(&mut self, from: StopIndex, to: StopIndex, meters: u32) -> Result<(), CatalogueError> {
        self.check_index(from)?;
        self.check_index(to)?;
        self.distances.insert(from, to, meters);
        Ok(())
    }

    /// Record distances from the named stop to each named neighbor.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStop` if any name was never added.
    pub fn add_distances<'a, I>(&mut self, from: &str, neighbors: I) -> Result<(), CatalogueError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let from_idx = self.require_stop(from)?;
        for (to, meters) in neighbors {
            let to_idx = self.require_stop(to)?;
            self.distances.insert(from_idx, to_idx, meters);
        }
        Ok(())
    }

    /// Road distance between two stops, falling back to the reverse
    /// direction and then to 0.
    pub fn distance(&self, from: StopIndex, to: StopIndex) -> u32 {
        self.distances.get(from, to)
    }

    /// Add a bus over already-added stops and compute its statistics.
    ///
    /// The bus name is registered on every stop it visits.
    ///
    /// # Errors
    ///
    /// - `DuplicateBus` if the name is taken
    /// - `EmptyRoute` if `stops` is empty
    /// - `StopIndexOutOfRange` if any index does not name an existing stop
    pub fn add_route(
        &mut self,
        name: &str,
        stops: Vec<StopIndex>,
        is_circular: bool,
    ) -> Result<BusIndex, CatalogueError> {
        if self.bus_ids.contains_key(name) {
            return Err(CatalogueError::DuplicateBus(name.to_string()));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(name.to_string()));
        }
        for &stop in &stops {
            self.check_index(stop)?;
        }

        let stats = BusStats::compute(
            &stops,
            is_circular,
            |s| self.stops[s.0].coordinates(),
            |a, b| self.distances.get(a, b),
        );

        for &stop in &stops {
            self.stops[stop.0].register_bus(name);
        }

        let index = BusIndex(self.buses.len());
        self.buses
            .push(Bus::new(index, name.to_string(), stops, is_circular, stats));
        self.bus_ids.insert(name.to_string(), index);
        trace!(bus = name, stop_count = stats.stop_count, "added bus");
        Ok(index)
    }

    /// Resolve stop names to indices, in order.
    pub fn resolve_stops<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<StopIndex>, CatalogueError> {
        names
            .iter()
            .map(|name| self.require_stop(name.as_ref()))
            .collect()
    }

    pub fn contains_bus(&self, name: &str) -> bool {
        self.bus_ids.contains_key(name)
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_ids.get(name).map(|idx| &self.buses[idx.0])
    }

    pub fn bus_at(&self, index: BusIndex) -> Option<&Bus> {
        self.buses.get(index.0)
    }

    pub fn contains_stop(&self, name: &str) -> bool {
        self.stop_ids.contains_key(name)
    }

    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_ids.get(name).map(|idx| &self.stops[idx.0])
    }

    pub fn stop_at(&self, index: StopIndex) -> Option<&Stop> {
        self.stops.get(index.0)
    }

    pub fn stop_index(&self, name: &str) -> Option<StopIndex> {
        self.stop_ids.get(name).copied()
    }

    /// All stops, in index order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses, in insertion order.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    fn require_stop(&self, name: &str) -> Result<StopIndex, CatalogueError> {
        self.stop_index(name)
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
    }

    fn check_index(&self, index: StopIndex) -> Result<(), CatalogueError> {
        if index.0 < self.stops.len() {
            Ok(())
        } else {
            Err(CatalogueError::StopIndexOutOfRange(index))
        }
    }
}
