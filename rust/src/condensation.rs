//! Condensation of a graph by its SCC partition.

use rustc_hash::FxHashMap;
use std::str::FromStr;

use crate::error::GraphError;
use crate::graph::{Edge, Graph, Weight};
use crate::scc::SccDecomposition;

/// Which weight to keep when several original edges connect the same pair
/// of components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Weight of the first crossing edge encountered.
    #[default]
    First,
    /// Smallest crossing weight.
    Min,
    /// Largest crossing weight.
    Max,
}

impl WeightPolicy {
    fn merge(self, current: Weight, candidate: Weight) -> Weight {
        match self {
            WeightPolicy::First => current,
            WeightPolicy::Min => current.min(candidate),
            WeightPolicy::Max => current.max(candidate),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightPolicy::First => "first",
            WeightPolicy::Min => "min",
            WeightPolicy::Max => "max",
        }
    }
}

impl FromStr for WeightPolicy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(WeightPolicy::First),
            "min" => Ok(WeightPolicy::Min),
            "max" => Ok(WeightPolicy::Max),
            other => Err(GraphError::UnknownWeightPolicy(other.to_string())),
        }
    }
}

/// Collapse each component of `sccs` into a single vertex.
///
/// Vertex `i` of the result stands for component `i`. Each ordered pair of
/// distinct components gets at most one edge, placed where the first crossing
/// edge was seen; `policy` decides its weight. Edges inside a component are
/// dropped.
pub fn condense(
    graph: &Graph,
    sccs: &SccDecomposition,
    policy: WeightPolicy,
) -> Result<Graph, GraphError> {
    let n = graph.vertex_count();
    if sccs.vertex_count() != n {
        return Err(GraphError::PartitionMismatch {
            expected: n,
            actual: sccs.vertex_count(),
        });
    }

    let component_count = sccs.len();
    let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); component_count];
    // (source component, target component) -> position in adjacency[source]
    let mut added: FxHashMap<(usize, usize), usize> = FxHashMap::default();

    for (from, edge) in graph.edges() {
        let source = sccs.component_of[from];
        let target = sccs.component_of[edge.to];
        if source == target {
            continue;
        }
        if source >= component_count || target >= component_count {
            return Err(GraphError::ComponentOutOfRange {
                component: source.max(target),
                component_count,
            });
        }

        match added.get(&(source, target)) {
            Some(&slot) => {
                let kept = &mut adjacency[source][slot];
                kept.weight = policy.merge(kept.weight, edge.weight);
            }
            None => {
                added.insert((source, target), adjacency[source].len());
                adjacency[source].push(Edge {
                    to: target,
                    weight: edge.weight,
                });
            }
        }
    }

    Graph::from_edges(
        component_count,
        true,
        adjacency.into_iter().enumerate().flat_map(|(source, edges)| {
            edges
                .into_iter()
                .map(move |edge| (source, edge.to, edge.weight))
        }),
    )
}
