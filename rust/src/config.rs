//! Configuration for the analysis pipeline.

use crate::condensation::WeightPolicy;
use crate::error::GraphError;
use crate::logging::VERBOSITY_SILENT;
use crate::topo::TopoStrategy;

/// Configuration for strategy selection and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Ordering strategy for the condensation graph: "kahn" or "dfs"
    pub topo_strategy: TopoStrategy,
    /// Weight kept for parallel inter-component edges: "first", "min" or "max"
    pub weight_policy: WeightPolicy,
    /// Verbosity level: 0=silent, 1=summary, 2=detail, 3=debug
    pub verbosity: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            topo_strategy: TopoStrategy::Kahn,
            weight_policy: WeightPolicy::First,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl AnalysisConfig {
    /// Build a config from optional string settings, falling back to defaults.
    pub fn from_options(
        topo_strategy: Option<&str>,
        weight_policy: Option<&str>,
        verbosity: Option<u8>,
    ) -> Result<Self, GraphError> {
        let defaults = Self::default();
        Ok(Self {
            topo_strategy: match topo_strategy {
                Some(s) => s.parse()?,
                None => defaults.topo_strategy,
            },
            weight_policy: match weight_policy {
                Some(s) => s.parse()?,
                None => defaults.weight_policy,
            },
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        })
    }
}
