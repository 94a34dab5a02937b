//! Error types shared by every analysis stage.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors that can occur while building or analyzing a task graph.
///
/// Unreachable vertices are not errors: a `PathResult` records them as
/// `Distance::Unreached`. `NoPath` is only produced when a caller asks for the
/// path to such a vertex.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Cycle detected: no topological order exists")]
    CycleDetected,
    #[error("No path to vertex {target}")]
    NoPath { target: VertexId },
    #[error("Vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
    #[error("Order has {actual} vertices but graph has {expected}")]
    OrderLengthMismatch { expected: usize, actual: usize },
    #[error("Component {component} out of range for partition with {component_count} components")]
    ComponentOutOfRange {
        component: usize,
        component_count: usize,
    },
    #[error("Partition covers {actual} vertices but graph has {expected}")]
    PartitionMismatch { expected: usize, actual: usize },
    #[error("Distance overflow relaxing edge {from} -> {to}")]
    WeightOverflow { from: VertexId, to: VertexId },
    #[error("Invalid graph input: {0}")]
    InvalidInput(String),
    #[error("Unknown ordering strategy: {0}")]
    UnknownStrategy(String),
    #[error("Unknown weight policy: {0}")]
    UnknownWeightPolicy(String),
}

impl GraphError {
    /// Out-of-range error for `vertex` in a graph of `vertex_count` vertices.
    pub fn out_of_range(vertex: VertexId, vertex_count: usize) -> Self {
        Self::VertexOutOfRange {
            vertex,
            vertex_count,
        }
    }
}
