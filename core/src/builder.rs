use crate::error::{GraphError, Result};
use crate::graph::NodeId;

/// Capacity a node's destination list receives on its first append.
pub const INITIAL_CAPACITY: usize = 10;

/// Per-node destination lists, filled before the CSR layout is known.
///
/// Each list starts at `INITIAL_CAPACITY` on first use and doubles when full,
/// so appends are amortized O(1). Nodes that never receive an edge stay
/// unallocated. The builder is consumed by [`CsrGraph::build`] and dropped.
///
/// [`CsrGraph::build`]: crate::CsrGraph::build
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    lists: Vec<Vec<NodeId>>,
}

impl AdjacencyBuilder {
    /// Empty lists for node ids `0..node_count`.
    pub fn new(node_count: usize) -> Self {
        let mut lists = Vec::with_capacity(node_count);
        lists.resize_with(node_count, Vec::new);
        Self { lists }
    }

    pub fn node_count(&self) -> usize {
        self.lists.len()
    }

    /// Append `destination` to the list of `source`.
    ///
    /// Both ids must lie in `0..node_count`; the builder never grows its node
    /// range after construction.
    pub fn append(&mut self, source: NodeId, destination: NodeId) -> Result<()> {
        let node_count = self.lists.len();
        for node in [source, destination] {
            if node as usize >= node_count {
                return Err(GraphError::InvalidNode { node, node_count });
            }
        }

        let list = &mut self.lists[source as usize];
        if list.len() == list.capacity() {
            // reserve_exact keeps the growth policy ours, not the allocator's
            let grow = list.capacity().max(INITIAL_CAPACITY);
            list.reserve_exact(grow);
        }
        list.push(destination);
        Ok(())
    }

    /// Number of destinations recorded per node, indexed by node id.
    pub fn counts(&self) -> Vec<usize> {
        self.lists.iter().map(Vec::len).collect()
    }

    /// Total destinations recorded across all nodes.
    pub fn edge_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub(crate) fn lists(&self) -> &[Vec<NodeId>] {
        &self.lists
    }
}
