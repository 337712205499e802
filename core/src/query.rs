use std::collections::HashSet;

use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId};

/// Degree and neighbor information for a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub node_id: NodeId,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
    pub neighbors: Vec<NodeId>,
}

/// Whole-graph counters.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    /// Edges per node; 0.0 for an empty graph.
    pub average_degree: f64,
    pub memory_bytes: usize,
}

impl CsrGraph {
    /// Number of outgoing edges of `node`, or 0 when `node` is out of range.
    pub fn out_degree(&self, node: NodeId) -> usize {
        if !self.contains(node) {
            return 0;
        }
        let offsets = self.row_offsets();
        let i = node as usize;
        offsets[i + 1] - offsets[i]
    }

    /// Number of incoming edges of `node`, or 0 when `node` is out of range.
    ///
    /// No transpose is kept, so this scans every edge slot: O(edge_count)
    /// per call.
    pub fn in_degree(&self, node: NodeId) -> usize {
        if !self.contains(node) {
            return 0;
        }
        self.column_indices().iter().filter(|&&v| v == node).count()
    }

    /// Out-neighbors of `node` in storage order, as a fresh `Vec` owned by
    /// the caller. Empty for out-of-range ids.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbor_slice(node).to_vec()
    }

    /// The node with the largest out-degree, and that degree.
    ///
    /// Scans ids in increasing order and only a strictly larger degree
    /// replaces the current best, so ties go to the smallest id. `None` when
    /// no node has an outgoing edge.
    pub fn max_degree_node(&self) -> Option<(NodeId, usize)> {
        let mut best: Option<(NodeId, usize)> = None;
        for (i, w) in self.row_offsets().windows(2).enumerate() {
            let degree = w[1] - w[0];
            if degree > best.map_or(0, |(_, d)| d) {
                best = Some((i as NodeId, degree));
            }
        }
        best
    }

    /// Out-degree, in-degree and neighbors of one node.
    pub fn node_summary(&self, node: NodeId) -> Result<NodeSummary> {
        if !self.contains(node) {
            return Err(GraphError::InvalidNode {
                node,
                node_count: self.node_count(),
            });
        }
        let out_degree = self.out_degree(node);
        let in_degree = self.in_degree(node);
        Ok(NodeSummary {
            node_id: node,
            out_degree,
            in_degree,
            total_degree: out_degree + in_degree,
            neighbors: self.neighbors(node),
        })
    }

    /// Edges of the subgraph induced by `nodes`: every stored edge whose
    /// endpoints are both in the set.
    ///
    /// Sources come in the order of `nodes` (repeats skipped), destinations
    /// in storage order. Parallel edges and self-loops are kept as stored.
    /// Out-of-range ids are ignored.
    pub fn induced_edges(&self, nodes: &[NodeId]) -> Vec<(NodeId, NodeId)> {
        let members: HashSet<NodeId> = nodes
            .iter()
            .copied()
            .filter(|&n| self.contains(n))
            .collect();

        let mut emitted: HashSet<NodeId> = HashSet::with_capacity(members.len());
        let mut edges = Vec::new();
        for &node in nodes {
            if !members.contains(&node) || !emitted.insert(node) {
                continue;
            }
            for &next in self.neighbor_slice(node) {
                if members.contains(&next) {
                    edges.push((node, next));
                }
            }
        }
        edges
    }

    pub fn stats(&self) -> GraphStats {
        let node_count = self.node_count();
        let edge_count = self.edge_count();
        GraphStats {
            node_count,
            edge_count,
            directed: self.is_directed(),
            average_degree: if node_count > 0 {
                edge_count as f64 / node_count as f64
            } else {
                0.0
            },
            memory_bytes: self.memory_usage(),
        }
    }
}
