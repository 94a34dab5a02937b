//! Order-driven relaxation over a DAG.
//!
//! All three analyses share one pass: visit vertices in topological order and
//! relax their outgoing edges. They differ only in initialization, in whether
//! vertices before the source are skipped, and in the comparison direction.

use crate::error::GraphError;
use crate::graph::{Graph, VertexId, Weight};
use crate::metrics::{Metrics, Timer};

use super::types::{Distance, PathResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    fn improves(self, candidate: Weight, current: Distance) -> bool {
        match current {
            // Unreached is +∞ when minimizing and −∞ when maximizing, so any
            // finite candidate wins.
            Distance::Unreached => true,
            Distance::Finite(current) => match self {
                Direction::Minimize => candidate < current,
                Direction::Maximize => candidate > current,
            },
        }
    }
}

fn validate_order(graph: &Graph, order: &[VertexId]) -> Result<(), GraphError> {
    let n = graph.vertex_count();
    if order.len() != n {
        return Err(GraphError::OrderLengthMismatch {
            expected: n,
            actual: order.len(),
        });
    }
    for &vertex in order {
        graph.check_vertex(vertex)?;
    }
    Ok(())
}

/// Relax every edge of every vertex in `order` that is at or after `source`
/// in the order and already reached.
fn relax_in_order(
    graph: &Graph,
    order: &[VertexId],
    source: Option<VertexId>,
    mut distances: Vec<Distance>,
    direction: Direction,
) -> Result<PathResult, GraphError> {
    let mut parents: Vec<Option<VertexId>> = vec![None; graph.vertex_count()];
    let mut metrics = Metrics::default();
    let timer = Timer::start();

    let mut after_source = source.is_none();
    for &u in order {
        if Some(u) == source {
            after_source = true;
        }
        if !after_source {
            continue;
        }
        let Distance::Finite(du) = distances[u] else {
            continue;
        };

        for edge in graph.neighbors(u) {
            let v = edge.to;
            let candidate = du
                .checked_add(edge.weight)
                .ok_or(GraphError::WeightOverflow { from: u, to: v })?;
            if direction.improves(candidate, distances[v]) {
                distances[v] = Distance::Finite(candidate);
                parents[v] = Some(u);
                metrics.relaxations += 1;
            }
        }
    }

    timer.stop(&mut metrics);

    Ok(PathResult {
        distances,
        parents,
        source,
        metrics,
    })
}

fn from_source(
    graph: &Graph,
    order: &[VertexId],
    source: VertexId,
    direction: Direction,
) -> Result<PathResult, GraphError> {
    graph.check_vertex(source)?;
    validate_order(graph, order)?;

    let mut distances = vec![Distance::Unreached; graph.vertex_count()];
    distances[source] = Distance::Finite(0);
    relax_in_order(graph, order, Some(source), distances, direction)
}

/// Single-source shortest paths over a DAG in the given topological order.
///
/// `order` must be a topological order of `graph`; it is not re-validated
/// beyond its length and vertex ids.
pub fn shortest_paths(
    graph: &Graph,
    order: &[VertexId],
    source: VertexId,
) -> Result<PathResult, GraphError> {
    from_source(graph, order, source, Direction::Minimize)
}

/// Single-source longest paths over a DAG in the given topological order.
pub fn longest_paths(
    graph: &Graph,
    order: &[VertexId],
    source: VertexId,
) -> Result<PathResult, GraphError> {
    from_source(graph, order, source, Direction::Maximize)
}

/// Longest path ending at each vertex, starting from any vertex.
///
/// Every distance starts at zero and every vertex is processed, so each entry
/// holds the heaviest path from some zero in-degree ancestor. Use
/// `PathResult::critical_path` to extract the overall longest path.
pub fn find_critical_path(graph: &Graph, order: &[VertexId]) -> Result<PathResult, GraphError> {
    validate_order(graph, order)?;

    let distances = vec![Distance::Finite(0); graph.vertex_count()];
    relax_in_order(graph, order, None, distances, Direction::Maximize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{reconstruct_path, CriticalPath};

    fn weighted_diamond() -> Graph {
        // 0 -> 1 (5), 0 -> 2 (3), 1 -> 3 (2), 2 -> 3 (6)
        Graph::from_edges(4, true, [(0, 1, 5), (0, 2, 3), (1, 3, 2), (2, 3, 6)]).unwrap()
    }

    #[test]
    fn test_shortest_paths_diamond() {
        let result = shortest_paths(&weighted_diamond(), &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(
            result.distance_values(),
            vec![Some(0), Some(5), Some(3), Some(7)]
        );
        assert_eq!(result.reconstruct_path(3), Ok(vec![0, 1, 3]));
        assert_eq!(result.source, Some(0));
    }

    #[test]
    fn test_longest_paths_diamond() {
        let result = longest_paths(&weighted_diamond(), &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(
            result.distance_values(),
            vec![Some(0), Some(5), Some(3), Some(9)]
        );
        assert_eq!(result.reconstruct_path(3), Ok(vec![0, 2, 3]));
    }

    #[test]
    fn test_chain_path_reconstruction() {
        let chain = Graph::from_edges(4, true, [(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();
        let result = shortest_paths(&chain, &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(reconstruct_path(&result, 3), Ok(vec![0, 1, 2, 3]));
        assert_eq!(result.metrics.relaxations, 3);
    }

    #[test]
    fn test_vertices_before_source_are_skipped() {
        // 0 -> 1 -> 2, source 1: vertex 0 stays unreached
        let chain = Graph::from_edges(3, true, [(0, 1, 4), (1, 2, 6)]).unwrap();
        let result = shortest_paths(&chain, &[0, 1, 2], 1).unwrap();
        assert_eq!(result.distance_values(), vec![None, Some(0), Some(6)]);
        assert_eq!(
            result.reconstruct_path(0),
            Err(GraphError::NoPath { target: 0 })
        );
        assert_eq!(result.reconstruct_path(2), Ok(vec![1, 2]));
    }

    #[test]
    fn test_unreached_vertex_has_no_path() {
        let g = Graph::from_edges(3, true, [(0, 1, 1)]).unwrap();
        let shortest = shortest_paths(&g, &[0, 1, 2], 0).unwrap();
        let longest = longest_paths(&g, &[0, 1, 2], 0).unwrap();
        for result in [shortest, longest] {
            assert_eq!(result.distances[2], Distance::Unreached);
            assert_eq!(result.parents[2], None);
            assert_eq!(
                result.reconstruct_path(2),
                Err(GraphError::NoPath { target: 2 })
            );
        }
    }

    #[test]
    fn test_negative_weights() {
        let g = Graph::from_edges(3, true, [(0, 1, -4), (0, 2, 1), (1, 2, -1)]).unwrap();
        let result = shortest_paths(&g, &[0, 1, 2], 0).unwrap();
        assert_eq!(result.distance_values(), vec![Some(0), Some(-4), Some(-5)]);
    }

    #[test]
    fn test_critical_path_diamond() {
        let result = find_critical_path(&weighted_diamond(), &[0, 1, 2, 3]).unwrap();
        assert_eq!(
            result.distance_values(),
            vec![Some(0), Some(5), Some(3), Some(9)]
        );
        assert_eq!(result.source, None);
        assert_eq!(
            result.critical_path(),
            Some(CriticalPath {
                end: 3,
                length: 9,
                vertices: vec![0, 2, 3],
            })
        );
    }

    #[test]
    fn test_critical_path_spans_disconnected_parts() {
        // 0 -> 1 (2) and 2 -> 3 (7): the heavier part wins regardless of source
        let g = Graph::from_edges(4, true, [(0, 1, 2), (2, 3, 7)]).unwrap();
        let result = find_critical_path(&g, &[0, 2, 1, 3]).unwrap();
        let critical = result.critical_path().unwrap();
        assert_eq!(critical.length, 7);
        assert_eq!(critical.vertices, vec![2, 3]);
    }

    #[test]
    fn test_critical_path_without_edges() {
        let g = Graph::new(3, true);
        let result = find_critical_path(&g, &[0, 1, 2]).unwrap();
        let critical = result.critical_path().unwrap();
        assert_eq!(critical.end, 0);
        assert_eq!(critical.length, 0);
        assert_eq!(critical.vertices, vec![0]);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(0, true);
        let result = find_critical_path(&g, &[]).unwrap();
        assert!(result.critical_path().is_none());
        assert_eq!(
            shortest_paths(&g, &[], 0).unwrap_err(),
            GraphError::VertexOutOfRange {
                vertex: 0,
                vertex_count: 0
            }
        );
    }

    #[test]
    fn test_order_length_mismatch() {
        assert_eq!(
            shortest_paths(&weighted_diamond(), &[0, 1, 2], 0).unwrap_err(),
            GraphError::OrderLengthMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            find_critical_path(&weighted_diamond(), &[0, 1, 2, 7]).unwrap_err(),
            GraphError::VertexOutOfRange {
                vertex: 7,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let g = Graph::from_edges(3, true, [(0, 1, Weight::MAX), (1, 2, 1)]).unwrap();
        assert_eq!(
            longest_paths(&g, &[0, 1, 2], 0).unwrap_err(),
            GraphError::WeightOverflow { from: 1, to: 2 }
        );
    }
}
