use csr_graph_core::NodeId;

/// BFS depth bound as given on the command line: `-1` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimit(pub Option<u32>);

/// Parse a `--max-depth` value. `-1` is unbounded; any other negative value
/// is rejected.
pub fn parse_depth(s: &str) -> Result<DepthLimit, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an integer", s))?;
    match value {
        -1 => Ok(DepthLimit(None)),
        v if v < 0 => Err(format!("max depth must be -1 (unbounded) or non-negative, got {}", v)),
        v => u32::try_from(v)
            .map(|d| DepthLimit(Some(d)))
            .map_err(|_| format!("max depth {} is too large", v)),
    }
}

/// Node id as given on the command line. `None` when it is negative or too
/// large to be a node id at all.
pub fn node_id(raw: i64) -> Option<NodeId> {
    NodeId::try_from(raw).ok()
}

/// Render up to `limit` ids, then "... (and N more)".
pub fn format_ids(ids: &[NodeId], limit: usize) -> String {
    let shown: Vec<String> = ids.iter().take(limit).map(|id| id.to_string()).collect();
    let mut out = shown.join(", ");
    if ids.len() > limit {
        out.push_str(&format!(" ... (and {} more)", ids.len() - limit));
    }
    out
}
