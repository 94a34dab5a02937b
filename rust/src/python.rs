//! Python bindings for the task graph analysis.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::AnalysisConfig;
use crate::error::GraphError;
use crate::graph::{Graph, VertexId, Weight};
use crate::pipeline::{analyze, analyze_json as run_json, ScheduleReport};
use crate::scc::decompose_scc;
use crate::topo::{order_if_acyclic, TopoStrategy};

fn to_py_err(err: GraphError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Result of a full analysis (PyO3 wrapper).
#[pyclass(name = "ScheduleReport")]
#[derive(Clone, Debug)]
pub struct PyScheduleReport {
    #[pyo3(get)]
    pub sccs: Vec<Vec<VertexId>>,
    #[pyo3(get)]
    pub cyclic_sccs: Vec<usize>,
    #[pyo3(get)]
    pub scc_order: Vec<usize>,
    #[pyo3(get)]
    pub task_order: Vec<VertexId>,
    #[pyo3(get)]
    pub source_scc: Option<usize>,
    /// Shortest distance per SCC from the source SCC (None = unreached).
    #[pyo3(get)]
    pub shortest_distances: Vec<Option<Weight>>,
    #[pyo3(get)]
    pub critical_path_length: Option<Weight>,
    #[pyo3(get)]
    pub critical_path: Vec<usize>,
}

impl From<ScheduleReport> for PyScheduleReport {
    fn from(report: ScheduleReport) -> Self {
        let (critical_path_length, critical_path) = match report.critical_path {
            Some(path) => (Some(path.length), path.vertices),
            None => (None, Vec::new()),
        };
        Self {
            cyclic_sccs: report.sccs.cyclic_components().collect(),
            sccs: report.sccs.components,
            scc_order: report.scc_order,
            task_order: report.task_order,
            source_scc: report.source_component,
            shortest_distances: report
                .shortest
                .map(|r| r.distance_values())
                .unwrap_or_default(),
            critical_path_length,
            critical_path,
        }
    }
}

#[pymethods]
impl PyScheduleReport {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleReport(sccs={}, task_order={:?}, critical_path_length={:?})",
            self.sccs.len(),
            self.task_order,
            self.critical_path_length
        )
    }
}

/// Run the full analysis on a graph given as `(u, v, w)` triples.
///
/// # Raises
/// * ValueError on out-of-range vertices, unknown strategy or weight policy
#[pyfunction]
#[pyo3(signature = (n, edges, source=None, directed=true, strategy=None, weight_policy=None, verbosity=0))]
#[allow(clippy::too_many_arguments)]
fn analyze_graph(
    n: usize,
    edges: Vec<(VertexId, VertexId, Weight)>,
    source: Option<VertexId>,
    directed: bool,
    strategy: Option<String>,
    weight_policy: Option<String>,
    verbosity: u8,
) -> PyResult<PyScheduleReport> {
    let config =
        AnalysisConfig::from_options(strategy.as_deref(), weight_policy.as_deref(), Some(verbosity))
            .map_err(to_py_err)?;
    let graph = Graph::from_edges(n, directed, edges).map_err(to_py_err)?;
    analyze(&graph, source, &config)
        .map(PyScheduleReport::from)
        .map_err(to_py_err)
}

/// Run the full analysis on a JSON graph document.
#[pyfunction]
#[pyo3(signature = (text, strategy=None, weight_policy=None, verbosity=0))]
fn analyze_json(
    text: &str,
    strategy: Option<String>,
    weight_policy: Option<String>,
    verbosity: u8,
) -> PyResult<PyScheduleReport> {
    let config =
        AnalysisConfig::from_options(strategy.as_deref(), weight_policy.as_deref(), Some(verbosity))
            .map_err(to_py_err)?;
    run_json(text, &config)
        .map(PyScheduleReport::from)
        .map_err(to_py_err)
}

/// Strongly connected components of a directed graph.
#[pyfunction]
fn strongly_connected_components(
    n: usize,
    edges: Vec<(VertexId, VertexId, Weight)>,
) -> PyResult<Vec<Vec<VertexId>>> {
    let graph = Graph::from_edges(n, true, edges).map_err(to_py_err)?;
    Ok(decompose_scc(&graph).components)
}

/// Topological order of a directed graph, or None if it contains a cycle.
#[pyfunction]
#[pyo3(signature = (n, edges, strategy="kahn"))]
fn topological_sort(
    n: usize,
    edges: Vec<(VertexId, VertexId, Weight)>,
    strategy: &str,
) -> PyResult<Option<Vec<VertexId>>> {
    let strategy: TopoStrategy = strategy.parse().map_err(to_py_err)?;
    let graph = Graph::from_edges(n, true, edges).map_err(to_py_err)?;
    order_if_acyclic(&graph, strategy).map_err(to_py_err)
}

/// The taskgraph.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyScheduleReport>()?;

    m.add_function(wrap_pyfunction!(analyze_graph, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_json, m)?)?;
    m.add_function(wrap_pyfunction!(strongly_connected_components, m)?)?;
    m.add_function(wrap_pyfunction!(topological_sort, m)?)?;

    Ok(())
}
