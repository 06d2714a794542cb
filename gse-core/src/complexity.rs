// ============================================================================
// STRUCTURAL COMPLEXITY ESTIMATOR
// ============================================================================
//
//   C(G) = H(G) * R(G) * D(G)
//
// H: Shannon entropy of the degree distribution (information content)
// R: communities per node, M / N (redundancy)
// D: BFS depth from the highest-degree node of each component (hierarchy)
//
// Normalized form:
//   H_norm = H / log2(max(2, N))
//   D_norm = D / (1 + log2(max(2, N)))
//   C_norm = H_norm * R * D_norm
//
// The max(2, N) guard keeps both denominators positive for N in {0, 1}.
//
// DEGENERATE GRAPHS:
// - N = 0: H = 0, R = 0, M = 0, Q = 0, D = 1 (sentinel), C = 0
// - No edges, N > 0: degree distribution taken as uniform, H = log2(N)
// - Community detection failure: M falls back to the component count, Q = 0
// ============================================================================

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::community::{greedy_modularity_communities, modularity};
use crate::graph::Graph;

/// Normalized companions of H, D and C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedComplexity {
    pub h_norm: f64,
    pub d_norm: f64,
    pub c_norm: f64,
}

/// One estimator result. Built once per call, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityRecord {
    /// Node count
    pub n: usize,
    /// Degree entropy (bits)
    pub h: f64,
    /// Redundancy M / N
    pub r: f64,
    /// Community count
    pub m: usize,
    /// Modularity of the detected partition
    pub q: f64,
    /// Hierarchy depth
    pub d: f64,
    pub c_raw: f64,
    /// Present when the estimate was normalized
    #[serde(flatten)]
    pub normalized: Option<NormalizedComplexity>,
}

impl ComplexityRecord {
    pub fn h_norm(&self) -> Option<f64> {
        self.normalized.map(|n| n.h_norm)
    }

    pub fn d_norm(&self) -> Option<f64> {
        self.normalized.map(|n| n.d_norm)
    }

    pub fn c_norm(&self) -> Option<f64> {
        self.normalized.map(|n| n.c_norm)
    }
}

/// Redundancy measurement: R = M / N plus the partition's modularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Redundancy {
    pub r: f64,
    pub m: usize,
    pub q: f64,
}

// ============================================================================
// H: SHANNON ENTROPY
// ============================================================================

/// Shannon entropy (base 2) of the degree distribution p_v = deg(v) / Σdeg.
///
/// Zero-degree nodes are dropped. A graph with nodes but no edges is treated
/// as the uniform distribution and yields log2(N), the maximum.
pub fn shannon_entropy(graph: &Graph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }

    let degrees = graph.degrees();
    let total: usize = degrees.iter().sum();
    if total == 0 {
        return (graph.num_nodes() as f64).log2();
    }

    let total = total as f64;
    // + 0.0: all degree on one node sums to 0.0 and would negate to -0.0
    -degrees
        .iter()
        .filter(|&&d| d > 0)
        .map(|&d| {
            let p = d as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
        + 0.0
}

// ============================================================================
// R: REDUNDANCY
// ============================================================================

/// Community count per node, with the modularity of that partition.
///
/// Detection failures never propagate: the connected-component count stands
/// in for M and Q is reported as 0.0.
pub fn redundancy(graph: &Graph) -> Redundancy {
    let n = graph.num_nodes();
    if graph.is_empty() {
        return Redundancy {
            r: 0.0,
            m: 0,
            q: 0.0,
        };
    }

    let (m, q) = match greedy_modularity_communities(graph) {
        Ok(communities) => {
            let q = modularity(graph, &communities);
            (communities.len(), if q.is_finite() { q } else { 0.0 })
        }
        Err(e) => {
            let components = graph.connected_components().len();
            warn!(
                "Community detection failed ({}); using {} connected components",
                e, components
            );
            (components, 0.0)
        }
    };

    Redundancy {
        r: m as f64 / n as f64,
        m,
        q,
    }
}

// ============================================================================
// D: HIERARCHY DEPTH
// ============================================================================

/// Depth of one component: eccentricity of its highest-degree node.
///
/// Ties go to the smallest node index. Single-node components count as 1.
fn component_depth(graph: &Graph, component: &[u32]) -> f64 {
    if component.len() <= 1 {
        return 1.0;
    }

    // `component` is ascending, so the first maximum is the smallest index
    let mut root = component[0];
    for &v in component {
        if graph.degree(v) > graph.degree(root) {
            root = v;
        }
    }

    let depth = graph
        .bfs_distances(root)
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);

    (depth as f64).max(1.0)
}

/// Node-weighted mean of per-component BFS depths, floored at 1.0.
///
/// Returns the 1.0 sentinel for an empty graph.
pub fn hierarchy_depth(graph: &Graph) -> f64 {
    let n = graph.num_nodes();
    if graph.is_empty() {
        return 1.0;
    }

    let components = graph.connected_components();

    // PARALLEL: one BFS per component; collected in component order so the
    // weighted sum below runs in the same order every time.
    let depths: Vec<(usize, f64)> = components
        .par_iter()
        .map(|component| (component.len(), component_depth(graph, component)))
        .collect();

    let weighted: f64 = depths.iter().map(|&(size, d)| d * size as f64).sum();
    (weighted / n as f64).max(1.0)
}

// ============================================================================
// C: COMPOSITE
// ============================================================================

/// Compute the full complexity record for a graph.
pub fn estimate(graph: &Graph, normalize: bool) -> ComplexityRecord {
    let n = graph.num_nodes();
    let h = shannon_entropy(graph);
    let Redundancy { r, m, q } = redundancy(graph);
    let d = hierarchy_depth(graph);

    let c_raw = h * r * d;

    let normalized = normalize.then(|| {
        let log_n = (n.max(2) as f64).log2();
        let h_norm = h / log_n;
        let d_norm = d / (1.0 + log_n);
        NormalizedComplexity {
            h_norm,
            d_norm,
            c_norm: h_norm * r * d_norm,
        }
    });

    debug!(
        "Complexity: N={} H={:.4} R={:.4} M={} Q={:.4} D={:.4} C_raw={:.4}",
        n, h, r, m, q, d, c_raw
    );

    ComplexityRecord {
        n,
        h,
        r,
        m,
        q,
        d,
        c_raw,
        normalized,
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
