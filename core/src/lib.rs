//! csr-graph-core: compressed sparse-row graph store.
//!
//! Loads a directed graph from a plain `origin destination` edge list into
//! three flat arrays (row offsets, column indices, unit edge values) and
//! answers degree, neighbor, BFS and DFS queries directly against them.
//! The structure is write-once: nothing mutates it after [`CsrGraph::build`].
//!
//! ```
//! use csr_graph_core::{bfs, dfs, CsrGraph};
//!
//! let graph = CsrGraph::from_edges([(0, 1), (0, 2), (1, 2), (2, 0)]);
//! assert_eq!(graph.out_degree(0), 2);
//! assert_eq!(graph.in_degree(2), 2);
//! assert_eq!(bfs(&graph, 0, None).order, vec![0, 1, 2]);
//! assert_eq!(dfs(&graph, 0).order, vec![0, 1, 2]);
//! assert_eq!(graph.max_degree_node(), Some((0, 2)));
//! ```

mod builder;
mod error;
mod graph;
mod query;
mod reader;
mod traversal;

pub use builder::{AdjacencyBuilder, INITIAL_CAPACITY};
pub use error::{GraphError, Result};
pub use graph::{CsrGraph, NodeId, UNIT_WEIGHT};
pub use query::{GraphStats, NodeSummary};
pub use reader::{load, read_edges, size_edges, EdgeListSize, RawEdges};
pub use traversal::{bfs, dfs, extract_subgraph, Subgraph, TraversalResult};
