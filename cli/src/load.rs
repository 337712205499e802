use std::path::Path;
use std::time::Instant;

use csr_graph_core::{CsrGraph, GraphError};
use tracing::info;

use crate::config::Settings;
use crate::error::{CliError, Result};

const MB: usize = 1024 * 1024;

/// A loaded graph plus how long loading took.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: CsrGraph,
    pub load_time_ms: f64,
}

/// Load `path` and enforce the configured memory cap.
///
/// The cap is checked against the estimate from the sizing pass, before the
/// adjacency lists or CSR arrays are allocated.
pub fn load_graph(path: &Path, settings: &Settings) -> Result<LoadedGraph> {
    let start = Instant::now();
    let max_bytes = (settings.max_memory_mb as usize).saturating_mul(MB);
    let graph = CsrGraph::load_with_limit(path, max_bytes).map_err(|e| match e {
        GraphError::MemoryLimit { required_bytes, .. } => CliError::MemoryLimit {
            required_mb: required_bytes.div_ceil(MB),
            max_mb: settings.max_memory_mb,
        },
        other => other.into(),
    })?;

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(load_time_ms, "graph ready");
    Ok(LoadedGraph {
        graph,
        load_time_ms,
    })
}
