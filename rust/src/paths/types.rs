//! Types for DAG path analysis.

use std::fmt;

use crate::error::GraphError;
use crate::graph::{VertexId, Weight};
use crate::metrics::Metrics;

/// Best known distance to a vertex.
///
/// `Unreached` stands for +∞ in shortest-path mode and −∞ in longest-path
/// mode; either way no path has been found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Distance {
    #[default]
    Unreached,
    Finite(Weight),
}

impl Distance {
    pub fn is_reached(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<Weight> {
        match self {
            Distance::Finite(w) => Some(*w),
            Distance::Unreached => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{}", w),
            Distance::Unreached => write!(f, "unreached"),
        }
    }
}

/// Distances and predecessor links from one analysis run.
#[derive(Clone, Debug, Default)]
pub struct PathResult {
    pub distances: Vec<Distance>,
    pub parents: Vec<Option<VertexId>>,
    /// Source vertex; `None` for a critical-path run, which has no single
    /// source.
    pub source: Option<VertexId>,
    pub metrics: Metrics,
}

impl PathResult {
    /// Distance to `vertex`, or `None` if unreached or out of range.
    pub fn distance(&self, vertex: VertexId) -> Option<Weight> {
        self.distances.get(vertex).and_then(Distance::value)
    }

    /// Plain distance values, `None` for unreached vertices.
    pub fn distance_values(&self) -> Vec<Option<Weight>> {
        self.distances.iter().map(Distance::value).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.distances.len()
    }

    /// Path ending at `target`, from the vertex where its predecessor chain
    /// starts.
    pub fn reconstruct_path(&self, target: VertexId) -> Result<Vec<VertexId>, GraphError> {
        reconstruct_path(self, target)
    }

    /// Vertex with the greatest distance; the lowest id wins ties.
    pub fn farthest(&self) -> Option<(VertexId, Weight)> {
        let mut best: Option<(VertexId, Weight)> = None;
        for (vertex, distance) in self.distances.iter().enumerate() {
            if let Distance::Finite(w) = *distance {
                if best.map_or(true, |(_, best_w)| w > best_w) {
                    best = Some((vertex, w));
                }
            }
        }
        best
    }

    /// Longest path recorded in this result, ending at `farthest()`.
    pub fn critical_path(&self) -> Option<CriticalPath> {
        let (end, length) = self.farthest()?;
        let vertices = self.reconstruct_path(end).ok()?;
        Some(CriticalPath {
            end,
            length,
            vertices,
        })
    }
}

/// The overall longest path of a DAG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriticalPath {
    /// Last vertex of the path.
    pub end: VertexId,
    /// Total weight along the path.
    pub length: Weight,
    /// Vertices from start to `end`.
    pub vertices: Vec<VertexId>,
}

/// Walk predecessor links back from `target` and return the path in forward
/// order.
///
/// Returns `GraphError::NoPath` if `target` was never reached.
pub fn reconstruct_path(result: &PathResult, target: VertexId) -> Result<Vec<VertexId>, GraphError> {
    let n = result.vertex_count();
    match result.distances.get(target) {
        None => return Err(GraphError::out_of_range(target, n)),
        Some(Distance::Unreached) => return Err(GraphError::NoPath { target }),
        Some(Distance::Finite(_)) => {}
    }

    let mut path = vec![target];
    let mut current = target;
    while let Some(parent) = result.parents.get(current).copied().flatten() {
        // Parent links of a DAG result never repeat; more than n hops means
        // they were produced from an order that did not match the graph.
        if path.len() > n {
            return Err(GraphError::NoPath { target });
        }
        path.push(parent);
        current = parent;
    }

    path.reverse();
    Ok(path)
}
