//! End-to-end task graph analysis.
//!
//! Runs every stage in sequence:
//! 1. Decompose the task graph into strongly connected components
//! 2. Condense the components into a DAG
//! 3. Order the DAG topologically and expand it into a task order
//! 4. Compute shortest paths from the source's component
//! 5. Compute the critical path of the DAG

use crate::condensation::condense;
use crate::config::AnalysisConfig;
use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::input::GraphInput;
use crate::metrics::Metrics;
use crate::paths::{find_critical_path, shortest_paths, CriticalPath, PathResult};
use crate::scc::{decompose_scc, SccDecomposition};
use crate::topo::{derive_task_order, topological_order};
use crate::{log_debug, log_detail, log_summary};

/// Metrics of each pipeline stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct StageMetrics {
    pub scc: Metrics,
    pub topo: Metrics,
    pub shortest: Metrics,
    pub critical: Metrics,
}

/// Everything computed for one task graph.
#[derive(Clone, Debug)]
pub struct ScheduleReport {
    pub sccs: SccDecomposition,
    /// One vertex per component.
    pub condensation: Graph,
    /// Topological order of the condensation graph.
    pub scc_order: Vec<usize>,
    /// Task execution order over the original vertices.
    pub task_order: Vec<VertexId>,
    /// Component shortest paths start from.
    pub source_component: Option<usize>,
    /// Shortest paths over the condensation graph; `None` when it is empty.
    pub shortest: Option<PathResult>,
    /// Per-component critical-path distances.
    pub critical: PathResult,
    /// Longest path of the condensation graph; `None` when it is empty.
    pub critical_path: Option<CriticalPath>,
    pub metrics: StageMetrics,
}

/// Run the full analysis on `graph`.
///
/// Shortest paths start from the component containing `source`, or from
/// component 0 when no source is given.
pub fn analyze(
    graph: &Graph,
    source: Option<VertexId>,
    config: &AnalysisConfig,
) -> Result<ScheduleReport, GraphError> {
    let verbosity = config.verbosity;
    if let Some(source) = source {
        graph.check_vertex(source)?;
    }

    log_summary!(
        verbosity,
        "Graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let sccs = decompose_scc(graph);
    log_summary!(verbosity, "Found {} SCCs", sccs.len());
    for (idx, component) in sccs.components.iter().enumerate() {
        log_detail!(
            verbosity,
            "  SCC {}: {:?} (size: {}){}",
            idx,
            component,
            component.len(),
            if sccs.is_cyclic(idx) { " cyclic" } else { "" }
        );
    }
    log_debug!(verbosity, "SCC {}", sccs.metrics);

    let condensation = condense(graph, &sccs, config.weight_policy)?;
    log_summary!(
        verbosity,
        "Condensation: {} vertices, {} edges (weight policy: {})",
        condensation.vertex_count(),
        condensation.edge_count(),
        config.weight_policy.as_str()
    );

    let topo = topological_order(&condensation, config.topo_strategy)?;
    let task_order = derive_task_order(&topo.order, &sccs.components)?;
    log_summary!(
        verbosity,
        "SCC order ({}): {:?}",
        config.topo_strategy.as_str(),
        topo.order
    );
    log_summary!(verbosity, "Task order: {:?}", task_order);
    log_debug!(verbosity, "Topological {}", topo.metrics);

    let source_component = match source {
        Some(vertex) => sccs.component_of(vertex),
        None if sccs.is_empty() => None,
        None => Some(0),
    };

    let shortest = match source_component {
        Some(component) => {
            let result = shortest_paths(&condensation, &topo.order, component)?;
            for (target, distance) in result.distances.iter().enumerate() {
                if !distance.is_reached() {
                    continue;
                }
                match result.reconstruct_path(target) {
                    Ok(path) => {
                        log_detail!(verbosity, "  To SCC {}: {} via {:?}", target, distance, path);
                    }
                    Err(e) => {
                        log_detail!(verbosity, "  To SCC {}: {} ({})", target, distance, e);
                    }
                }
            }
            log_debug!(verbosity, "Shortest paths {}", result.metrics);
            Some(result)
        }
        None => None,
    };

    let critical = find_critical_path(&condensation, &topo.order)?;
    let critical_path = critical.critical_path();
    if let Some(path) = &critical_path {
        log_summary!(
            verbosity,
            "Critical path length {}: {:?}",
            path.length,
            path.vertices
        );
    }
    log_debug!(verbosity, "Critical path {}", critical.metrics);

    let metrics = StageMetrics {
        scc: sccs.metrics,
        topo: topo.metrics,
        shortest: shortest.as_ref().map(|r| r.metrics).unwrap_or_default(),
        critical: critical.metrics,
    };

    Ok(ScheduleReport {
        sccs,
        condensation,
        scc_order: topo.order,
        task_order,
        source_component,
        shortest,
        critical,
        critical_path,
        metrics,
    })
}

/// Parse a JSON graph document and run the full analysis on it.
///
/// The document's `source` field selects the shortest-path source.
pub fn analyze_json(text: &str, config: &AnalysisConfig) -> Result<ScheduleReport, GraphError> {
    let input = GraphInput::from_json(text)?;
    log_summary!(config.verbosity, "Weight model: {}", input.weight_model);
    let graph = input.to_graph()?;
    analyze(&graph, input.source, config)
}
