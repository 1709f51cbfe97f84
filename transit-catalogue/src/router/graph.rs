//! Directed weighted graph with dense vertex and edge ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Edge weight: a distance-equivalent in meters.
pub type Weight = u64;

/// Vertex id; the router uses stop indices directly.
pub type VertexId = usize;

/// Edge id, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
}

/// Error returned when graph data refers to vertices that do not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("edge {edge} refers to vertex {vertex}, but the graph has {vertex_count} vertices")]
pub struct InvalidGraph {
    edge: EdgeId,
    vertex: VertexId,
    vertex_count: usize,
}

/// Adjacency-list graph. Edges are never removed, so ids stay stable.
///
/// Serializes as its vertex count and edge list; incidence lists are
/// rebuilt on load in the original edge order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRecord", into = "GraphRecord")]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Add an edge and return its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGraph` if either endpoint is not a vertex.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, InvalidGraph> {
        let id = EdgeId(self.edges.len());
        for vertex in [edge.from, edge.to] {
            if vertex >= self.incidence.len() {
                return Err(InvalidGraph {
                    edge: id,
                    vertex,
                    vertex_count: self.incidence.len(),
                });
            }
        }

        self.edges.push(edge);
        self.incidence[edge.from].push(id);
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// All edges, indexed by `EdgeId`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `vertex`, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.incidence
            .get(vertex)
            .into_iter()
            .flatten()
            .map(|&id| (id, &self.edges[id.0]))
    }
}

#[derive(Serialize, Deserialize)]
struct GraphRecord {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl TryFrom<GraphRecord> for DirectedWeightedGraph {
    type Error = InvalidGraph;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = DirectedWeightedGraph::new(record.vertex_count);
        for edge in record.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

impl From<DirectedWeightedGraph> for GraphRecord {
    fn from(graph: DirectedWeightedGraph) -> Self {
        GraphRecord {
            vertex_count: graph.incidence.len(),
            edges: graph.edges,
        }
    }
}
