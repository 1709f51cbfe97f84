//! Transit routing over a finished catalogue.
//!
//! The router is built once, after the catalogue and settings are final:
//! the builder expands bus routes into a weighted graph, the engine answers
//! shortest-path queries over it, and the itinerary composer turns the edge
//! path into wait and ride segments.

mod builder;
mod engine;
mod graph;
mod itinerary;
mod settings;

#[cfg(test)]
mod router_tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use builder::{EdgeInfo, RouteGraph, RouteGraphBuilder};
pub use engine::{InvalidTable, RouteEntry, RouteInfo, ShortestPathEngine, SourceTable};
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, InvalidGraph, VertexId, Weight};
pub use itinerary::{Segment, Travel, compose};
pub use settings::{InvalidSettings, RoutingSettings};

use crate::catalogue::TransportCatalogue;

/// Routing graph, edge metadata and shortest-path engine for one catalogue.
///
/// Holds no reference to the catalogue it was built from; queries take it
/// as an argument so the router can be persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRouter {
    settings: RoutingSettings,
    edge_infos: Vec<EdgeInfo>,
    engine: ShortestPathEngine,
}

impl TransportRouter {
    /// Build the router from a fully populated catalogue.
    pub fn new(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Result<Self, InvalidGraph> {
        let RouteGraph { graph, edge_infos } = RouteGraphBuilder::new(catalogue, &settings).build()?;
        Ok(Self {
            settings,
            edge_infos,
            engine: ShortestPathEngine::new(graph),
        })
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn edge_infos(&self) -> &[EdgeInfo] {
        &self.edge_infos
    }

    pub fn engine(&self) -> &ShortestPathEngine {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut ShortestPathEngine {
        &mut self.engine
    }

    /// Fastest itinerary between two named stops.
    ///
    /// Returns an empty itinerary when `from == to`, and `None` when either
    /// stop is unknown, either stop has no buses, or no path connects them.
    pub fn route(&mut self, catalogue: &TransportCatalogue, from: &str, to: &str) -> Option<Travel> {
        let stop_from = catalogue.stop(from)?;
        let stop_to = catalogue.stop(to)?;

        if stop_from.index() == stop_to.index() {
            return Some(Travel::empty());
        }
        if !stop_from.is_served() || !stop_to.is_served() {
            debug!(from, to, "route endpoint has no buses");
            return None;
        }

        let Some(route) = self
            .engine
            .build_route(stop_from.index().0, stop_to.index().0)
        else {
            debug!(from, to, "no route");
            return None;
        };

        let travel = compose(&route, &self.edge_infos, &self.settings)?;
        debug!(
            from,
            to,
            rides = travel.ride_count(),
            total_time_min = travel.total_time_min(),
            "routed"
        );
        Some(travel)
    }

    /// Compute the shortest-path table for every stop, so that a persisted
    /// router never has to recompute one.
    pub fn precompute_all(&mut self) {
        self.engine.precompute_all();
    }
}
