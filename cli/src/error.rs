use std::path::PathBuf;

use csr_graph_core::GraphError;
use thiserror::Error;

/// Errors surfaced by the `csr-graph` command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("config error: {message} (path: {})", path.display())]
    ConfigFile { message: String, path: PathBuf },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("loading needs ~{required_mb}MB, exceeds max_memory_mb={max_mb}MB")]
    MemoryLimit { required_mb: usize, max_mb: u32 },

    #[error("node {node} is outside the graph (node_count = {node_count})")]
    InvalidNode { node: i64, node_count: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
