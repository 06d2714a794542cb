// Error types for graph construction, community detection and configuration.
//
// The Estimator and the Adjuster themselves never return these: they are
// total over well-typed input. Errors surface only where a caller builds
// something (a graph, a generator run, a config) from untrusted parameters.

use thiserror::Error;

/// Errors raised while building or analysing a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// An edge references a node index outside `0..num_nodes`.
    #[error("node {0} out of bounds (graph has {1} nodes)")]
    NodeOutOfBounds(u32, u32),

    /// A generator or algorithm parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The graph carries no structure the algorithm can work with
    /// (e.g. modularity over a graph with no edges).
    #[error("degenerate graph: {0}")]
    DegenerateGraph(String),
}

/// Errors raised when validating axiom or policy configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        ConfigError::InvalidValue {
            field,
            value,
            reason,
        }
    }
}
