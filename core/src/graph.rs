use std::io::{BufRead, Seek};
use std::path::Path;

use tracing::{debug, info};

use crate::builder::AdjacencyBuilder;
use crate::error::Result;
use crate::reader::{self, RawEdges};

/// Node identifier: a dense index in `0..node_count`.
pub type NodeId = u32;

/// Weight stored for every edge slot. Edges are unweighted.
pub const UNIT_WEIGHT: u32 = 1;

/// Directed graph in compressed sparse-row form.
///
/// Three flat arrays hold the whole structure:
/// - `row_offsets[i]..row_offsets[i + 1]` is the range of node i's out-edges,
/// - `column_indices` holds the destination of each edge slot, grouped by
///   source in arrival order,
/// - `edge_values` is parallel to `column_indices` and always 1.
///
/// The arrays are boxed slices: once [`CsrGraph::build`] returns, nothing can
/// resize or mutate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    row_offsets: Box<[usize]>,
    column_indices: Box<[NodeId]>,
    edge_values: Box<[u32]>,
    directed: bool,
}

impl CsrGraph {
    /// Flatten per-node adjacency lists into the CSR arrays.
    ///
    /// One prefix-sum pass sizes `row_offsets`, a second copies each node's
    /// list into place. O(node_count + edge_count).
    pub fn build(node_count: usize, edge_count: usize, adjacency: AdjacencyBuilder) -> Self {
        debug_assert_eq!(adjacency.node_count(), node_count);
        debug_assert_eq!(adjacency.edge_count(), edge_count);

        let lists = adjacency.lists();

        let mut row_offsets = Vec::with_capacity(node_count + 1);
        row_offsets.push(0usize);
        let mut running = 0usize;
        for list in lists {
            running += list.len();
            row_offsets.push(running);
        }

        let mut column_indices = Vec::with_capacity(edge_count);
        for list in lists {
            column_indices.extend_from_slice(list);
        }
        let edge_values = vec![UNIT_WEIGHT; column_indices.len()];

        debug!(
            nodes = node_count,
            edges = column_indices.len(),
            "CSR arrays built"
        );

        Self {
            row_offsets: row_offsets.into_boxed_slice(),
            column_indices: column_indices.into_boxed_slice(),
            edge_values: edge_values.into_boxed_slice(),
            directed: true,
        }
    }

    /// Load an edge-list file and build the graph from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_inner(path.as_ref(), None)
    }

    /// Like [`CsrGraph::load`], but refuse the file with
    /// [`GraphError::MemoryLimit`] when the peak load estimate exceeds
    /// `max_bytes`. The check runs between the sizing and filling passes.
    ///
    /// [`GraphError::MemoryLimit`]: crate::GraphError::MemoryLimit
    pub fn load_with_limit(path: impl AsRef<Path>, max_bytes: usize) -> Result<Self> {
        Self::load_inner(path.as_ref(), Some(max_bytes))
    }

    fn load_inner(path: &Path, max_bytes: Option<usize>) -> Result<Self> {
        let raw = reader::load(path, max_bytes)?;
        let graph = Self::from_raw(raw);
        info!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            memory_bytes = graph.memory_usage(),
            "edge list loaded"
        );
        Ok(graph)
    }

    /// Build from any seekable edge-list stream (files, in-memory cursors).
    pub fn from_reader<R: BufRead + Seek>(reader: R) -> std::io::Result<Self> {
        reader::read_edges(reader).map(Self::from_raw)
    }

    /// Build from already-parsed (origin, destination) pairs.
    ///
    /// Sizes the graph the same way the file reader does: node_count is the
    /// largest id seen plus one.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let edges: Vec<(NodeId, NodeId)> = edges.into_iter().collect();
        let node_count = edges
            .iter()
            .map(|&(u, v)| u.max(v) as usize + 1)
            .max()
            .unwrap_or(0);

        let mut adjacency = AdjacencyBuilder::new(node_count);
        for &(u, v) in &edges {
            let appended = adjacency.append(u, v);
            debug_assert!(appended.is_ok(), "edge ({u}, {v}) outside 0..{node_count}");
        }
        Self::build(node_count, edges.len(), adjacency)
    }

    fn from_raw(raw: RawEdges) -> Self {
        Self::build(raw.node_count, raw.edge_count, raw.adjacency)
    }

    pub fn node_count(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.column_indices.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether `node` lies in `0..node_count`.
    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.node_count()
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn column_indices(&self) -> &[NodeId] {
        &self.column_indices
    }

    pub fn edge_values(&self) -> &[u32] {
        &self.edge_values
    }

    /// Borrow node's out-neighbors straight from `column_indices`.
    /// Empty for out-of-range ids.
    pub fn neighbor_slice(&self, node: NodeId) -> &[NodeId] {
        if !self.contains(node) {
            return &[];
        }
        let i = node as usize;
        &self.column_indices[self.row_offsets[i]..self.row_offsets[i + 1]]
    }

    /// Approximate memory held by the three arrays, in bytes.
    pub fn memory_usage(&self) -> usize {
        Self::estimated_memory(self.node_count(), self.edge_count())
    }

    /// Bytes the three arrays take for a graph of the given size.
    pub fn estimated_memory(node_count: usize, edge_count: usize) -> usize {
        use std::mem::size_of;

        node_count
            .saturating_add(1)
            .saturating_mul(size_of::<usize>())
            .saturating_add(edge_count.saturating_mul(size_of::<NodeId>() + size_of::<u32>()))
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::build(0, 0, AdjacencyBuilder::new(0))
    }
}
