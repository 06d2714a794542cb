// Undirected graph model used by the complexity estimator.
//
// Nodes are the dense index range 0..num_nodes, edges are (u32, u32) pairs,
// the same edge-list convention the rest of the algorithms use. The graph is
// immutable once built: every query the estimator needs (degrees, connected
// components, BFS hop counts) is answered from a precomputed adjacency list.
//
// DEGREE CONVENTION:
// A self-loop (v, v) contributes 2 to deg(v), one for each endpoint.
// Parallel edges each count separately.

use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::errors::GraphError;

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

/// Validate that all edges reference valid node indices.
fn validate_edges(edges: &[(u32, u32)], num_nodes: u32) -> Result<(), GraphError> {
    for &(src, dst) in edges {
        if src >= num_nodes {
            return Err(GraphError::NodeOutOfBounds(src, num_nodes));
        }
        if dst >= num_nodes {
            return Err(GraphError::NodeOutOfBounds(dst, num_nodes));
        }
    }
    Ok(())
}

/// Finite undirected graph over nodes `0..num_nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    num_nodes: usize,
    edges: Vec<(u32, u32)>,
    adjacency: Vec<Vec<u32>>,
}

impl Graph {
    /// Build a graph from an edge list.
    ///
    /// # Errors
    /// - `NodeOutOfBounds` if any edge references a node >= num_nodes
    /// - `InvalidParameter` if num_nodes does not fit in a u32 index
    pub fn new(num_nodes: usize, edges: Vec<(u32, u32)>) -> Result<Self, GraphError> {
        let bound = u32::try_from(num_nodes).map_err(|_| {
            GraphError::InvalidParameter(format!("too many nodes: {}", num_nodes))
        })?;
        validate_edges(&edges, bound)?;

        let mut adjacency: Vec<Vec<u32>> = vec![vec![]; num_nodes];
        for &(src, dst) in &edges {
            // Self-loops land twice in the same list, giving degree 2
            adjacency[src as usize].push(dst);
            adjacency[dst as usize].push(src);
        }

        Ok(Self {
            num_nodes,
            edges,
            adjacency,
        })
    }

    /// Graph with `num_nodes` isolated nodes and no edges.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            adjacency: vec![vec![]; num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }

    pub fn degree(&self, node: u32) -> usize {
        self.adjacency[node as usize].len()
    }

    /// Degree sequence, index = node ID.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    /// Connected components, each sorted ascending, ordered by smallest member.
    ///
    /// Isolated nodes form singleton components. The ordering is a pure
    /// function of the edge set, so repeated calls agree exactly.
    pub fn connected_components(&self) -> Vec<Vec<u32>> {
        if self.num_nodes == 0 {
            return vec![];
        }

        let mut sets: UnionFind<u32> = UnionFind::new(self.num_nodes);
        for &(src, dst) in &self.edges {
            sets.union(src, dst);
        }

        // Walking nodes in ascending order means the first time a root is
        // seen is at that component's smallest member.
        let mut slot_of_root: FxHashMap<u32, usize> = FxHashMap::default();
        let mut components: Vec<Vec<u32>> = Vec::new();
        for node in 0..self.num_nodes as u32 {
            let root = sets.find(node);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(node);
        }

        components
    }

    /// Breadth-first hop counts from `root`; `None` for unreachable nodes.
    pub fn bfs_distances(&self, root: u32) -> Vec<Option<u32>> {
        let mut distance: Vec<Option<u32>> = vec![None; self.num_nodes];
        distance[root as usize] = Some(0);

        let mut queue: VecDeque<u32> = VecDeque::new();
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            let next = distance[v as usize].map_or(0, |d| d + 1);
            for &w in self.neighbors(v) {
                if distance[w as usize].is_none() {
                    distance[w as usize] = Some(next);
                    queue.push_back(w);
                }
            }
        }

        distance
    }
}
