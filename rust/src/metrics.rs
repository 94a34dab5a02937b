//! Per-call operation counters.
//!
//! Every analysis returns its own `Metrics` value alongside the result, so
//! runs never share counters.

use std::fmt;
use std::time::{Duration, Instant};

/// Counters collected during a single algorithm run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Wall-clock time spent in the main loop.
    pub elapsed: Duration,
    /// Vertices entered by a depth-first search.
    pub dfs_visits: usize,
    /// Edges examined by a depth-first search.
    pub edges_explored: usize,
    /// Successful distance relaxations.
    pub relaxations: usize,
    /// Queue pushes (Kahn).
    pub pushes: usize,
    /// Queue pops (Kahn).
    pub pops: usize,
}

impl Metrics {
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Measures elapsed time for a `Metrics` value.
pub(crate) struct Timer {
    start: Instant,
}

impl Timer {
    pub(crate) fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub(crate) fn stop(self, metrics: &mut Metrics) {
        metrics.elapsed = self.start.elapsed();
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metrics(time={:.3}ms, dfs_visits={}, edges={}, relaxations={}, pushes={}, pops={})",
            self.elapsed_millis(),
            self.dfs_visits,
            self.edges_explored,
            self.relaxations,
            self.pushes,
            self.pops
        )
    }
}
