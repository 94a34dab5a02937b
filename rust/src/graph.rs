//! Adjacency-list weighted multigraph.

use crate::error::GraphError;

/// Dense zero-based vertex index.
pub type VertexId = usize;

/// Edge weight (task duration or dependency cost).
pub type Weight = i64;

/// An outgoing edge stored in the adjacency list of its source vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: Weight,
}

/// Weighted multigraph over vertices `0..n`.
///
/// Outgoing edges keep insertion order so every traversal is deterministic.
/// Parallel edges are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    directed: bool,
}

impl Graph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            directed,
        }
    }

    /// Add an edge `from -> to`.
    ///
    /// In an undirected graph the reverse edge is stored as well.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        let n = self.vertex_count();
        for vertex in [from, to] {
            if vertex >= n {
                return Err(GraphError::out_of_range(vertex, n));
            }
        }

        self.adjacency[from].push(Edge { to, weight });
        if !self.directed {
            self.adjacency[to].push(Edge { to: from, weight });
        }
        Ok(())
    }

    /// Build a graph from `(from, to, weight)` triples.
    pub fn from_edges(
        vertex_count: usize,
        directed: bool,
        edges: impl IntoIterator<Item = (VertexId, VertexId, Weight)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(vertex_count, directed);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored edges (each undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Outgoing edges of `vertex`, in insertion order.
    ///
    /// Panics if `vertex` is out of range; algorithms only call this with
    /// ids they obtained from the graph itself.
    #[inline]
    pub fn neighbors(&self, vertex: VertexId) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Iterate all stored edges as `(from, edge)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, &Edge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |edge| (from, edge)))
    }

    /// Check that `vertex` is a valid id for this graph.
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::out_of_range(vertex, self.vertex_count()))
        }
    }

    /// New graph with every stored edge reversed.
    pub fn transpose(&self) -> Self {
        let mut adjacency = vec![Vec::new(); self.vertex_count()];
        for (from, edge) in self.edges() {
            adjacency[edge.to].push(Edge {
                to: from,
                weight: edge.weight,
            });
        }
        Self {
            adjacency,
            directed: self.directed,
        }
    }
}
