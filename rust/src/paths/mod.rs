//! Shortest, longest and critical paths over a DAG.
//!
//! Every analysis takes the graph together with a topological order of it
//! (usually the condensation graph and its Kahn order) and relaxes edges in
//! that order.

mod relaxation;
mod types;

pub use relaxation::{find_critical_path, longest_paths, shortest_paths};
pub use types::{reconstruct_path, CriticalPath, Distance, PathResult};
