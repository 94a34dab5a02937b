//! Task graph analysis for execution scheduling.
//!
//! This crate decomposes a directed, weighted task graph into strongly
//! connected components, condenses them into a DAG, orders that DAG
//! topologically and computes shortest, longest and critical paths over it.
//!
//! The stages can be used one by one or all at once through
//! [`pipeline::analyze`]. Python bindings are available with the `python`
//! feature.

pub mod condensation;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod paths;
pub mod pipeline;
pub mod scc;
pub mod topo;

#[cfg(feature = "python")]
mod python;

pub use condensation::{condense, WeightPolicy};
pub use config::AnalysisConfig;
pub use error::GraphError;
pub use graph::{Edge, Graph, VertexId, Weight};
pub use input::{EdgeInput, GraphInput, InputError};
pub use metrics::Metrics;
pub use paths::{
    find_critical_path, longest_paths, reconstruct_path, shortest_paths, CriticalPath, Distance,
    PathResult,
};
pub use pipeline::{analyze, analyze_json, ScheduleReport, StageMetrics};
pub use scc::{decompose_scc, SccDecomposition};
pub use topo::{
    derive_task_order, dfs_order, is_topological_order, kahn_order, order_if_acyclic,
    topological_order, TopoStrategy, TopologicalOrder,
};
