//! Graph generators for validation runs
//!
//! Random models are driven by `ChaCha8Rng::seed_from_u64`, so a fixed seed
//! always produces the same edge list (and the estimator then produces a
//! bit-identical record).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::GraphError;
use crate::graph::Graph;

/// Build a graph from generator output; generators only emit in-range edges.
fn assemble(num_nodes: usize, edges: Vec<(u32, u32)>) -> Graph {
    Graph::new(num_nodes, edges).unwrap_or_else(|_| Graph::empty(num_nodes))
}

/// G(n, p): every unordered pair i < j is an edge with probability `p`.
///
/// # Errors
/// - `InvalidParameter` if p is not in [0, 1]
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Result<Graph, GraphError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::InvalidParameter(format!(
            "edge probability must be in [0, 1], got {}",
            p
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for i in 0..n as u32 {
        for j in (i + 1)..n as u32 {
            if rng.gen::<f64>() < p {
                edges.push((i, j));
            }
        }
    }

    Ok(assemble(n, edges))
}

/// Barabási-Albert preferential attachment.
///
/// Starts from `m` isolated nodes; each new node attaches to `m` distinct
/// existing nodes drawn proportionally to their degree.
///
/// # Errors
/// - `InvalidParameter` unless 1 <= m < n
pub fn barabasi_albert(n: usize, m: usize, seed: u64) -> Result<Graph, GraphError> {
    if m < 1 || m >= n {
        return Err(GraphError::InvalidParameter(format!(
            "attachment count must satisfy 1 <= m < n, got m={} n={}",
            m, n
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity((n - m) * m);

    let mut targets: Vec<u32> = (0..m as u32).collect();
    // Each node appears once per incident edge: sampling from this list is
    // sampling proportionally to degree.
    let mut repeated: Vec<u32> = Vec::with_capacity(2 * (n - m) * m);

    for source in m as u32..n as u32 {
        for &t in &targets {
            edges.push((source, t));
        }
        repeated.extend(&targets);
        repeated.extend(std::iter::repeat(source).take(m));

        targets.clear();
        while targets.len() < m {
            let pick = repeated[rng.gen_range(0..repeated.len())];
            if !targets.contains(&pick) {
                targets.push(pick);
            }
        }
    }

    Ok(assemble(n, edges))
}

/// rows x cols grid with 4-neighbour connectivity; node id = r * cols + c.
///
/// # Errors
/// - `InvalidParameter` if rows * cols overflows
pub fn lattice_2d(rows: usize, cols: usize) -> Result<Graph, GraphError> {
    let n = rows.checked_mul(cols).ok_or_else(|| {
        GraphError::InvalidParameter(format!("lattice {}x{} is too large", rows, cols))
    })?;

    let id = |r: usize, c: usize| (r * cols + c) as u32;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                edges.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows {
                edges.push((id(r, c), id(r + 1, c)));
            }
        }
    }

    Graph::new(n, edges)
}

/// Every node connected to every other node.
pub fn complete(n: usize) -> Graph {
    let mut edges = Vec::new();
    for i in 0..n as u32 {
        for j in (i + 1)..n as u32 {
            edges.push((i, j));
        }
    }
    assemble(n, edges)
}

/// 0 - 1 - 2 - ... - n-1
pub fn path(n: usize) -> Graph {
    let edges = (1..n as u32).map(|i| (i - 1, i)).collect();
    assemble(n, edges)
}

/// Center node 0 joined to nodes 1..n
pub fn star(n: usize) -> Graph {
    let edges = (1..n as u32).map(|i| (0, i)).collect();
    assemble(n, edges)
}
