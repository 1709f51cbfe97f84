//! Single-source shortest paths with cached per-source tables.
//!
//! The first query from a source runs Dijkstra over the whole graph and
//! keeps the resulting table of best weights and predecessor edges. Later
//! queries from the same source only walk predecessors. Tables are plain
//! data so a fully precomputed engine can be persisted and reloaded.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId, Weight};

/// Best known way to reach one vertex from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub weight: Weight,
    /// Last edge on the best path; `None` only for the source itself.
    pub prev_edge: Option<EdgeId>,
}

/// Per-vertex entries for one source; `None` marks unreachable vertices.
pub type SourceTable = Vec<Option<RouteEntry>>;

/// A cached table that could not have come out of Dijkstra on this graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTable {
    #[error("{found} table slots for {expected} vertices")]
    SlotCount { found: usize, expected: usize },

    #[error("table for source {origin} has {found} entries, expected {expected}")]
    Length {
        origin: VertexId,
        found: usize,
        expected: usize,
    },

    #[error("table for source {origin} does not start at the source")]
    Origin { origin: VertexId },

    #[error("table for source {origin}: vertex {vertex} has an inconsistent predecessor")]
    Predecessor { origin: VertexId, vertex: VertexId },

    #[error("table for source {origin}: predecessors of vertex {vertex} form a cycle")]
    Cycle { origin: VertexId, vertex: VertexId },
}

/// A shortest path: total weight and the edges to traverse, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub weight: Weight,
    pub edges: Vec<EdgeId>,
}

/// Shortest-path engine over an immutable graph.
///
/// Not synchronized: queries take `&mut self` because they may fill the
/// table cache. Callers sharing one engine across threads must lock it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathEngine {
    graph: DirectedWeightedGraph,
    tables: Vec<Option<SourceTable>>,
}

impl ShortestPathEngine {
    pub fn new(graph: DirectedWeightedGraph) -> Self {
        let tables = vec![None; graph.vertex_count()];
        Self { graph, tables }
    }

    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Shortest path from `from` to `to`, computing and caching the table
    /// for `from` on first use.
    ///
    /// Returns `None` if either vertex is unknown or `to` is unreachable.
    pub fn build_route(&mut self, from: VertexId, to: VertexId) -> Option<RouteInfo> {
        if from >= self.graph.vertex_count() || to >= self.graph.vertex_count() {
            return None;
        }
        if self.tables.len() != self.graph.vertex_count() {
            self.tables.resize(self.graph.vertex_count(), None);
        }

        if self.tables[from].is_none() {
            self.tables[from] = Some(compute_table(&self.graph, from));
        }

        let table = self.tables[from].as_ref()?;
        reconstruct(&self.graph, table, to)
    }

    /// Shortest path computed from scratch, bypassing and not touching the
    /// cache. Always agrees with [`build_route`](Self::build_route).
    pub fn build_route_uncached(&self, from: VertexId, to: VertexId) -> Option<RouteInfo> {
        if from >= self.graph.vertex_count() || to >= self.graph.vertex_count() {
            return None;
        }
        let table = compute_table(&self.graph, from);
        reconstruct(&self.graph, &table, to)
    }

    /// Fill the table for every source that does not have one yet.
    pub fn precompute_all(&mut self) {
        let vertex_count = self.graph.vertex_count();
        self.tables.resize(vertex_count, None);
        for source in 0..vertex_count {
            if self.tables[source].is_none() {
                self.tables[source] = Some(compute_table(&self.graph, source));
            }
        }
        debug!(sources = vertex_count, "precomputed all source tables");
    }

    /// Number of sources whose table is already cached.
    pub fn cached_sources(&self) -> usize {
        self.tables.iter().filter(|t| t.is_some()).count()
    }

    /// Cached table for `source`, if one has been computed.
    pub fn source_table(&self, source: VertexId) -> Option<&SourceTable> {
        self.tables.get(source)?.as_ref()
    }

    /// Check every cached table against the graph.
    ///
    /// A valid table has one entry per vertex, a zero-weight root at its
    /// source, and for every other reached vertex a predecessor edge that
    /// ends there, starts at a reached vertex, and accounts for the weight.
    /// Predecessor chains must lead back to the source.
    pub fn validate_tables(&self) -> Result<(), InvalidTable> {
        let vertex_count = self.graph.vertex_count();
        if self.tables.len() != vertex_count {
            return Err(InvalidTable::SlotCount {
                found: self.tables.len(),
                expected: vertex_count,
            });
        }

        for (origin, table) in self.tables.iter().enumerate() {
            if let Some(table) = table {
                check_table(&self.graph, origin, table)?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn tables_mut(&mut self) -> &mut Vec<Option<SourceTable>> {
        &mut self.tables
    }
}

/// Dijkstra from `source` over the whole graph.
///
/// Ties go to whichever path reached a vertex first: the heap pops equal
/// weights by ascending vertex id, edges relax in insertion order, and an
/// entry is only replaced by a strictly lighter one.
fn compute_table(graph: &DirectedWeightedGraph, source: VertexId) -> SourceTable {
    let mut table: SourceTable = vec![None; graph.vertex_count()];
    table[source] = Some(RouteEntry {
        weight: 0,
        prev_edge: None,
    });

    let mut heap: BinaryHeap<Reverse<(Weight, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((weight, vertex))) = heap.pop() {
        // Skip stale heap entries
        if table[vertex].is_some_and(|entry| weight > entry.weight) {
            continue;
        }

        for (edge_id, edge) in graph.incident_edges(vertex) {
            let candidate = weight.saturating_add(edge.weight);
            let improves = match table[edge.to] {
                Some(entry) => candidate < entry.weight,
                None => true,
            };
            if improves {
                table[edge.to] = Some(RouteEntry {
                    weight: candidate,
                    prev_edge: Some(edge_id),
                });
                heap.push(Reverse((candidate, edge.to)));
            }
        }
    }

    debug!(
        source,
        reachable = table.iter().filter(|e| e.is_some()).count(),
        "computed source table"
    );
    table
}

fn check_table(graph: &DirectedWeightedGraph, origin: VertexId, table: &SourceTable) -> Result<(), InvalidTable> {
    if table.len() != graph.vertex_count() {
        return Err(InvalidTable::Length {
            origin,
            found: table.len(),
            expected: graph.vertex_count(),
        });
    }
    let root = RouteEntry {
        weight: 0,
        prev_edge: None,
    };
    if table[origin] != Some(root) {
        return Err(InvalidTable::Origin { origin });
    }

    for (vertex, entry) in table.iter().enumerate() {
        let Some(entry) = entry else { continue };
        let consistent = match entry.prev_edge {
            None => vertex == origin,
            Some(edge_id) => graph.edge(edge_id).is_some_and(|edge| {
                edge.to == vertex
                    && table[edge.from]
                        .is_some_and(|prev| prev.weight.saturating_add(edge.weight) == entry.weight)
            }),
        };
        if !consistent {
            return Err(InvalidTable::Predecessor { origin, vertex });
        }
    }

    // Zero-weight edges let a cycle satisfy the weight checks above
    let mut rooted = vec![false; table.len()];
    rooted[origin] = true;
    for start in 0..table.len() {
        if rooted[start] || table[start].is_none() {
            continue;
        }
        let mut chain = Vec::new();
        let mut vertex = start;
        while !rooted[vertex] {
            if chain.len() >= table.len() {
                return Err(InvalidTable::Cycle { origin, vertex: start });
            }
            chain.push(vertex);
            let edge = table[vertex]
                .and_then(|entry| entry.prev_edge)
                .and_then(|edge_id| graph.edge(edge_id))
                .ok_or(InvalidTable::Predecessor { origin, vertex })?;
            vertex = edge.from;
        }
        for vertex in chain {
            rooted[vertex] = true;
        }
    }
    Ok(())
}

/// Walk predecessor edges back from `to`.
///
/// A simple path has fewer edges than the table has vertices, so a longer
/// walk means the table is corrupt and yields `None`.
fn reconstruct(graph: &DirectedWeightedGraph, table: &SourceTable, to: VertexId) -> Option<RouteInfo> {
    let target = (*table.get(to)?)?;

    let mut edges = Vec::new();
    let mut prev = target.prev_edge;
    while let Some(edge_id) = prev {
        if edges.len() >= table.len() {
            return None;
        }
        edges.push(edge_id);
        let edge = graph.edge(edge_id)?;
        prev = (*table.get(edge.from)?)?.prev_edge;
    }
    edges.reverse();

    Some(RouteInfo {
        weight: target.weight,
        edges,
    })
}
