//! Expands bus routes into a routing graph.
//!
//! Every edge means "board this bus here, ride it, alight there". For each
//! bus and each ordered pair of positions `i < j` along its stop sequence
//! (and along the reversed sequence for linear routes) one edge is added,
//! weighted by the road distance between the two positions plus the wait
//! time converted to distance. The wait is therefore charged once per
//! boarding no matter how many stops the ride spans.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::graph::{DirectedWeightedGraph, Edge, EdgeId, InvalidGraph, Weight};
use super::settings::RoutingSettings;
use crate::catalogue::TransportCatalogue;
use crate::domain::{BusIndex, StopIndex};

/// What a graph edge stands for, indexed by `EdgeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeInfo {
    pub bus: BusIndex,
    pub from: StopIndex,
    pub to: StopIndex,
    /// Road distance ridden, without the wait component.
    pub distance_m: Weight,
    /// Number of stop-to-stop hops covered.
    pub span_count: usize,
}

/// The routing graph and its parallel edge metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGraph {
    pub graph: DirectedWeightedGraph,
    pub edge_infos: Vec<EdgeInfo>,
}

/// Builds a [`RouteGraph`] from a fully populated catalogue.
pub struct RouteGraphBuilder<'a> {
    catalogue: &'a TransportCatalogue,
    wait_distance: Weight,
}

impl<'a> RouteGraphBuilder<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: &RoutingSettings) -> Self {
        Self {
            catalogue,
            wait_distance: settings.wait_distance(),
        }
    }

    /// Build the graph. Vertices are stop indices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGraph` if a bus refers to a stop index outside the
    /// catalogue, which the catalogue's own checks rule out.
    pub fn build(self) -> Result<RouteGraph, InvalidGraph> {
        let mut route_graph = RouteGraph {
            graph: DirectedWeightedGraph::new(self.catalogue.stops().len()),
            edge_infos: Vec::new(),
        };

        for bus in self.catalogue.buses() {
            self.add_sequence(&mut route_graph, bus.index(), bus.stops())?;

            if !bus.is_circular() {
                let reversed: Vec<StopIndex> = bus.stops().iter().rev().copied().collect();
                self.add_sequence(&mut route_graph, bus.index(), &reversed)?;
            }
        }

        info!(
            vertices = route_graph.graph.vertex_count(),
            edges = route_graph.graph.edge_count(),
            wait_distance = self.wait_distance,
            "built routing graph"
        );
        Ok(route_graph)
    }

    /// Add one edge per ordered position pair of `stops`.
    fn add_sequence(
        &self,
        route_graph: &mut RouteGraph,
        bus: BusIndex,
        stops: &[StopIndex],
    ) -> Result<(), InvalidGraph> {
        for (i, &from) in stops.iter().enumerate() {
            let mut distance: Weight = 0;

            for j in (i + 1)..stops.len() {
                distance += Weight::from(self.catalogue.distance(stops[j - 1], stops[j]));
                let to = stops[j];

                let id: EdgeId = route_graph.graph.add_edge(Edge {
                    from: from.0,
                    to: to.0,
                    weight: distance + self.wait_distance,
                })?;
                debug_assert_eq!(id.0, route_graph.edge_infos.len());

                route_graph.edge_infos.push(EdgeInfo {
                    bus,
                    from,
                    to,
                    distance_m: distance,
                    span_count: j - i,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn settings() -> RoutingSettings {
        RoutingSettings::new(60.0, 6.0).unwrap()
    }

    fn catalogue_abc() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
            catalogue
                .add_stop(name, Coordinates::new(55.0 + i as f64 * 0.01, 37.0))
                .unwrap();
        }
        catalogue.add_distances("A", [("B", 1000)]).unwrap();
        catalogue.add_distances("B", [("C", 2000), ("A", 1500)]).unwrap();
        catalogue
    }

    #[test]
    fn circular_route_edges() {
        let mut catalogue = catalogue_abc();
        let stops = catalogue.resolve_stops(&["A", "B", "C", "A"]).unwrap();
        catalogue.add_route("1", stops, true).unwrap();

        let built = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();

        // 4 positions: 3 + 2 + 1 pairs
        assert_eq!(built.graph.edge_count(), 6);
        assert_eq!(built.edge_infos.len(), 6);

        // A -> C spans two hops
        let info = built.edge_infos[1];
        assert_eq!((info.from, info.to), (StopIndex(0), StopIndex(2)));
        assert_eq!(info.span_count, 2);
        assert_eq!(info.distance_m, 3000);
        assert_eq!(built.graph.edge(EdgeId(1)).unwrap().weight, 3000 + 6000);
    }

    #[test]
    fn linear_route_adds_reverse_pass() {
        let mut catalogue = catalogue_abc();
        let stops = catalogue.resolve_stops(&["A", "B", "C"]).unwrap();
        catalogue.add_route("2", stops, false).unwrap();

        let built = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();
        assert_eq!(built.graph.edge_count(), 6);

        // Reverse pass starts after the 3 forward edges: C->B, C->A, B->A
        let c_to_a = built.edge_infos[4];
        assert_eq!((c_to_a.from, c_to_a.to), (StopIndex(2), StopIndex(0)));
        // C->B falls back to B->C (2000), B->A is explicit (1500)
        assert_eq!(c_to_a.distance_m, 3500);
        assert_eq!(c_to_a.span_count, 2);
    }

    #[test]
    fn edge_info_matches_graph_edges() {
        let mut catalogue = catalogue_abc();
        let stops = catalogue.resolve_stops(&["A", "B", "C"]).unwrap();
        catalogue.add_route("2", stops, false).unwrap();
        let stops = catalogue.resolve_stops(&["C", "A", "C"]).unwrap();
        catalogue.add_route("3", stops, true).unwrap();

        let built = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();
        let wait = settings().wait_distance();

        for (edge, info) in built.graph.edges().iter().zip(&built.edge_infos) {
            assert_eq!(edge.from, info.from.0);
            assert_eq!(edge.to, info.to.0);
            assert_eq!(edge.weight, info.distance_m + wait);
        }
        assert_eq!(built.edge_infos.last().unwrap().bus, BusIndex(1));
    }

    #[test]
    fn single_stop_bus_adds_nothing() {
        let mut catalogue = catalogue_abc();
        catalogue.add_route("solo", vec![StopIndex(1)], false).unwrap();

        let built = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();
        assert_eq!(built.graph.edge_count(), 0);
        assert_eq!(built.graph.vertex_count(), 3);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let mut catalogue = catalogue_abc();
        let stops = catalogue.resolve_stops(&["A", "B", "C"]).unwrap();
        catalogue.add_route("2", stops, false).unwrap();

        let first = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();
        let second = RouteGraphBuilder::new(&catalogue, &settings()).build().unwrap();
        assert_eq!(first, second);
    }
}
