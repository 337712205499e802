use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while loading or addressing a CSR graph.
///
/// Queries and traversals never return these: an out-of-range node there
/// degrades to a neutral value (degree 0, empty sequence).
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("cannot read edge list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("node {node} is outside the graph (node_count = {node_count})")]
    InvalidNode { node: NodeId, node_count: usize },

    #[error("loading needs about {required_bytes} bytes, over the cap of {max_bytes}")]
    MemoryLimit {
        required_bytes: usize,
        max_bytes: usize,
    },
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results using `GraphError`.
pub type Result<T> = std::result::Result<T, GraphError>;
