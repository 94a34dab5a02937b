//! Topological ordering with cycle detection.
//!
//! Two strategies are provided:
//! - `Kahn`: in-degree counting with a FIFO frontier (primary)
//! - `Dfs`: depth-first post-order, reversed
//!
//! Both succeed or fail on exactly the same inputs, but may break ties
//! differently.

use std::collections::VecDeque;
use std::str::FromStr;

use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::metrics::{Metrics, Timer};

/// Topological ordering strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TopoStrategy {
    #[default]
    Kahn,
    Dfs,
}

impl TopoStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopoStrategy::Kahn => "kahn",
            TopoStrategy::Dfs => "dfs",
        }
    }
}

impl FromStr for TopoStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kahn" => Ok(TopoStrategy::Kahn),
            "dfs" => Ok(TopoStrategy::Dfs),
            other => Err(GraphError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A complete topological order of a graph's vertices.
#[derive(Clone, Debug, Default)]
pub struct TopologicalOrder {
    pub order: Vec<VertexId>,
    pub metrics: Metrics,
}

impl TopologicalOrder {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<VertexId> {
        self.order
    }
}

/// Order `graph` with the selected strategy.
pub fn topological_order(
    graph: &Graph,
    strategy: TopoStrategy,
) -> Result<TopologicalOrder, GraphError> {
    match strategy {
        TopoStrategy::Kahn => kahn_order(graph),
        TopoStrategy::Dfs => dfs_order(graph),
    }
}

/// Kahn's algorithm.
///
/// The frontier is seeded with zero in-degree vertices in ascending id order.
/// Returns `GraphError::CycleDetected` if any vertex is never released.
pub fn kahn_order(graph: &Graph) -> Result<TopologicalOrder, GraphError> {
    let n = graph.vertex_count();
    let mut metrics = Metrics::default();

    let mut in_degree = vec![0usize; n];
    for (_, edge) in graph.edges() {
        in_degree[edge.to] += 1;
    }

    let mut queue: VecDeque<VertexId> = VecDeque::new();
    for (vertex, &degree) in in_degree.iter().enumerate() {
        if degree == 0 {
            queue.push_back(vertex);
            metrics.pushes += 1;
        }
    }

    let mut order = Vec::with_capacity(n);
    let timer = Timer::start();

    while let Some(vertex) = queue.pop_front() {
        metrics.pops += 1;
        order.push(vertex);

        for edge in graph.neighbors(vertex) {
            let degree = &mut in_degree[edge.to];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(edge.to);
                metrics.pushes += 1;
            }
        }
    }

    timer.stop(&mut metrics);

    if order.len() != n {
        return Err(GraphError::CycleDetected);
    }

    Ok(TopologicalOrder { order, metrics })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Depth-first topological sort.
///
/// An edge into a vertex still on the active path is a cycle. Roots are taken
/// in ascending id order.
pub fn dfs_order(graph: &Graph) -> Result<TopologicalOrder, GraphError> {
    let n = graph.vertex_count();
    let mut metrics = Metrics::default();
    let mut marks = vec![Mark::Unvisited; n];
    let mut finished: Vec<VertexId> = Vec::with_capacity(n);
    // (vertex, next edge position)
    let mut frames: Vec<(VertexId, usize)> = Vec::new();

    let timer = Timer::start();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::Active;
        metrics.dfs_visits += 1;
        frames.push((root, 0));

        while let Some((vertex, next_edge)) = frames.last_mut() {
            let edges = graph.neighbors(*vertex);
            if *next_edge == edges.len() {
                marks[*vertex] = Mark::Done;
                finished.push(*vertex);
                frames.pop();
                continue;
            }

            let target = edges[*next_edge].to;
            *next_edge += 1;
            metrics.edges_explored += 1;

            match marks[target] {
                Mark::Unvisited => {
                    marks[target] = Mark::Active;
                    metrics.dfs_visits += 1;
                    frames.push((target, 0));
                }
                Mark::Active => {
                    timer.stop(&mut metrics);
                    return Err(GraphError::CycleDetected);
                }
                Mark::Done => {}
            }
        }
    }

    timer.stop(&mut metrics);

    finished.reverse();
    Ok(TopologicalOrder {
        order: finished,
        metrics,
    })
}

/// Order `graph`, treating a cycle as "no order" rather than an error.
///
/// Other errors are still returned.
pub fn order_if_acyclic(
    graph: &Graph,
    strategy: TopoStrategy,
) -> Result<Option<Vec<VertexId>>, GraphError> {
    match topological_order(graph, strategy) {
        Ok(order) => Ok(Some(order.into_vec())),
        Err(GraphError::CycleDetected) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check that `order` is a permutation of the graph's vertices in which every
/// edge points forward.
pub fn is_topological_order(graph: &Graph, order: &[VertexId]) -> bool {
    let n = graph.vertex_count();
    if order.len() != n {
        return false;
    }

    let mut position = vec![usize::MAX; n];
    for (pos, &vertex) in order.iter().enumerate() {
        if vertex >= n || position[vertex] != usize::MAX {
            return false;
        }
        position[vertex] = pos;
    }

    graph
        .edges()
        .all(|(from, edge)| position[from] < position[edge.to])
}

/// Expand an order over components into an order over the original vertices.
///
/// Each component contributes its members in stored order.
pub fn derive_task_order(
    component_order: &[usize],
    components: &[Vec<VertexId>],
) -> Result<Vec<VertexId>, GraphError> {
    let mut tasks = Vec::with_capacity(components.iter().map(Vec::len).sum());
    for &component in component_order {
        let members = components
            .get(component)
            .ok_or(GraphError::ComponentOutOfRange {
                component,
                component_count: components.len(),
            })?;
        tasks.extend_from_slice(members);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condensation::{condense, WeightPolicy};
    use crate::scc::decompose_scc;
    use proptest::prelude::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(n, true, edges.iter().map(|&(u, v)| (u, v, 1))).unwrap()
    }

    fn diamond() -> Graph {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)])
    }

    #[test]
    fn test_kahn_diamond() {
        let result = kahn_order(&diamond()).unwrap();
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert_eq!(result.metrics.pushes, 4);
        assert_eq!(result.metrics.pops, 4);
    }

    #[test]
    fn test_dfs_diamond() {
        let result = dfs_order(&diamond()).unwrap();
        assert_eq!(result.order, vec![0, 2, 1, 3]);
        assert!(is_topological_order(&diamond(), &result.order));
        assert_eq!(result.metrics.dfs_visits, 4);
        assert_eq!(result.metrics.edges_explored, 4);
    }

    #[test]
    fn test_kahn_ties_broken_by_id() {
        // 3 -> 0, 2 -> 1: seeds are 2 and 3
        let result = kahn_order(&graph(4, &[(3, 0), (2, 1)])).unwrap();
        assert_eq!(result.order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_cycle_detected_by_both_strategies() {
        let cyclic = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(kahn_order(&cyclic).unwrap_err(), GraphError::CycleDetected);
        assert_eq!(dfs_order(&cyclic).unwrap_err(), GraphError::CycleDetected);
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // 0 -> 1 -> 2 -> 1: Kahn releases 0 only
        let cyclic = graph(3, &[(0, 1), (1, 2), (2, 1)]);
        assert!(matches!(
            topological_order(&cyclic, TopoStrategy::Kahn),
            Err(GraphError::CycleDetected)
        ));
        assert!(matches!(
            topological_order(&cyclic, TopoStrategy::Dfs),
            Err(GraphError::CycleDetected)
        ));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let looped = graph(2, &[(0, 1), (1, 1)]);
        assert!(kahn_order(&looped).is_err());
        assert!(dfs_order(&looped).is_err());
    }

    #[test]
    fn test_empty_graph_is_acyclic() {
        let empty = Graph::new(0, true);
        assert!(kahn_order(&empty).unwrap().is_empty());
        assert!(dfs_order(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_no_edges_in_id_order() {
        let g = Graph::new(3, true);
        assert_eq!(kahn_order(&g).unwrap().order, vec![0, 1, 2]);
        assert_eq!(dfs_order(&g).unwrap().order, vec![2, 1, 0]);
    }

    #[test]
    fn test_is_topological_order_rejects_bad_orders() {
        let g = diamond();
        assert!(is_topological_order(&g, &[0, 1, 2, 3]));
        assert!(!is_topological_order(&g, &[1, 0, 2, 3]));
        assert!(!is_topological_order(&g, &[0, 1, 2]));
        assert!(!is_topological_order(&g, &[0, 1, 1, 3]));
        assert!(!is_topological_order(&g, &[0, 1, 2, 9]));
    }

    #[test]
    fn test_derive_task_order() {
        // (0 <-> 1) -> (2 <-> 3)
        let g = graph(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
        let sccs = decompose_scc(&g);
        let dag = condense(&g, &sccs, WeightPolicy::First).unwrap();
        let scc_order = kahn_order(&dag).unwrap();

        assert_eq!(scc_order.order, vec![1, 0]);
        let tasks = derive_task_order(&scc_order.order, &sccs.components).unwrap();
        assert_eq!(tasks, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_derive_task_order_unknown_component() {
        let components = vec![vec![0], vec![1]];
        assert_eq!(
            derive_task_order(&[0, 2], &components),
            Err(GraphError::ComponentOutOfRange {
                component: 2,
                component_count: 2
            })
        );
    }

    #[test]
    fn test_dfs_deep_chain_does_not_overflow() {
        let n = 200_000;
        let chain = Graph::from_edges(n, true, (1..n).map(|v| (v - 1, v, 1))).unwrap();
        let result = dfs_order(&chain).unwrap();
        assert_eq!(result.len(), n);
        assert_eq!(result.order[0], 0);
        assert_eq!(result.order[n - 1], n - 1);
    }

    #[test]
    fn test_order_if_acyclic() {
        let cyclic = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(order_if_acyclic(&cyclic, TopoStrategy::Kahn), Ok(None));
        assert_eq!(order_if_acyclic(&cyclic, TopoStrategy::Dfs), Ok(None));

        assert_eq!(
            order_if_acyclic(&diamond(), TopoStrategy::Kahn),
            Ok(Some(vec![0, 1, 2, 3]))
        );
        assert_eq!(
            order_if_acyclic(&diamond(), TopoStrategy::Dfs),
            Ok(Some(vec![0, 2, 1, 3]))
        );
        assert_eq!(
            order_if_acyclic(&Graph::new(0, true), TopoStrategy::Kahn),
            Ok(Some(Vec::new()))
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("dfs".parse::<TopoStrategy>(), Ok(TopoStrategy::Dfs));
        assert_eq!(TopoStrategy::default().as_str(), "kahn");
        assert!("bfs".parse::<TopoStrategy>().is_err());
    }

    fn arbitrary_graph() -> impl Strategy<Value = Graph> {
        (0usize..20).prop_flat_map(|n| {
            let edge = (0..n.max(1), 0..n.max(1));
            proptest::collection::vec(edge, 0..48).prop_map(move |edges| {
                let edges: Vec<_> = edges.into_iter().filter(|&(u, v)| u < n && v < n).collect();
                graph(n, &edges)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_strategies_agree_on_cycles(g in arbitrary_graph()) {
            let kahn = kahn_order(&g);
            let dfs = dfs_order(&g);
            prop_assert_eq!(kahn.is_ok(), dfs.is_ok());
            if let (Ok(kahn), Ok(dfs)) = (kahn, dfs) {
                prop_assert!(is_topological_order(&g, &kahn.order));
                prop_assert!(is_topological_order(&g, &dfs.order));
            }
        }

        #[test]
        fn prop_condensation_always_orderable(g in arbitrary_graph()) {
            let sccs = decompose_scc(&g);
            let dag = condense(&g, &sccs, WeightPolicy::First).unwrap();
            let scc_order = kahn_order(&dag).unwrap();
            prop_assert!(is_topological_order(&dag, &scc_order.order));

            let tasks = derive_task_order(&scc_order.order, &sccs.components).unwrap();
            let mut sorted = tasks.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..g.vertex_count()).collect::<Vec<_>>());
        }
    }
}
