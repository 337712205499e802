use tracing::warn;

use crate::graph::{CsrGraph, NodeId};

/// Result of a BFS or DFS walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    /// Nodes in the order they were first reached, start first.
    pub order: Vec<NodeId>,
    /// Set when the start node was outside `0..node_count`; `order` is then empty.
    pub invalid_start: bool,
    /// BFS: distance of the deepest layer reached.
    /// DFS: deepest stack depth reached (start = 0).
    pub max_distance: u32,
}

impl TraversalResult {
    fn invalid() -> Self {
        Self {
            order: Vec::new(),
            invalid_start: true,
            max_distance: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Induced subgraph around a BFS walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    /// BFS order from the start, cut at the node limit.
    pub nodes: Vec<NodeId>,
    /// Edges among `nodes`, see [`CsrGraph::induced_edges`].
    pub edges: Vec<(NodeId, NodeId)>,
    /// Nodes the walk reached before the cut.
    pub reached: usize,
    pub invalid_start: bool,
}

/// Walk BFS from `start` within `max_depth`, keep the first `node_limit`
/// nodes of the order, and collect the edges among them.
pub fn extract_subgraph(
    graph: &CsrGraph,
    start: NodeId,
    max_depth: Option<u32>,
    node_limit: Option<usize>,
) -> Subgraph {
    let walk = bfs(graph, start, max_depth);
    if walk.invalid_start {
        return Subgraph {
            invalid_start: true,
            ..Default::default()
        };
    }

    let reached = walk.order.len();
    let mut nodes = walk.order;
    if let Some(limit) = node_limit {
        nodes.truncate(limit);
    }
    let edges = graph.induced_edges(&nodes);

    Subgraph {
        nodes,
        edges,
        reached,
        invalid_start: false,
    }
}

/// Breadth-first walk from `start`, at most `max_depth` hops out.
///
/// `max_depth = None` walks the whole reachable set. A node is recorded the
/// moment it is enqueued, and neighbors are examined in CSR storage order, so
/// the result is layer order with ties broken by edge arrival order. Nodes at
/// distance `max_depth` are included but not expanded.
pub fn bfs(graph: &CsrGraph, start: NodeId, max_depth: Option<u32>) -> TraversalResult {
    if !graph.contains(start) {
        warn!(start, node_count = graph.node_count(), "bfs: invalid start node");
        return TraversalResult::invalid();
    }

    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut distance = vec![0u32; n];

    // The discovery order doubles as the frontier queue: everything before
    // `head` has been expanded.
    let mut order: Vec<NodeId> = Vec::new();
    let mut head = 0usize;
    let mut max_distance = 0u32;

    visited[start as usize] = true;
    order.push(start);

    while head < order.len() {
        let current = order[head];
        head += 1;

        let depth = distance[current as usize];
        if max_depth.is_some_and(|limit| depth >= limit) {
            continue;
        }

        for &next in graph.neighbor_slice(current) {
            let slot = next as usize;
            if !visited[slot] {
                visited[slot] = true;
                distance[slot] = depth + 1;
                max_distance = max_distance.max(depth + 1);
                order.push(next);
            }
        }
    }

    TraversalResult {
        order,
        invalid_start: false,
        max_distance,
    }
}

/// Depth-first preorder walk from `start`, unbounded depth.
///
/// A node is recorded on first visit, then each unvisited out-neighbor is
/// walked in storage order before returning. The call stack is replaced by
/// an explicit stack of (node, next edge slot) frames, so long chains cannot
/// overflow it; the visit order equals the recursive formulation.
pub fn dfs(graph: &CsrGraph, start: NodeId) -> TraversalResult {
    if !graph.contains(start) {
        warn!(start, node_count = graph.node_count(), "dfs: invalid start node");
        return TraversalResult::invalid();
    }

    let offsets = graph.row_offsets();
    let columns = graph.column_indices();

    let mut visited = vec![false; graph.node_count()];
    let mut order: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = Vec::new();
    let mut max_distance = 0u32;

    visited[start as usize] = true;
    order.push(start);
    stack.push((start, offsets[start as usize]));

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        let end = offsets[node as usize + 1];

        // Advance this frame to its next unvisited neighbor, if any.
        let mut slot = cursor;
        while slot < end && visited[columns[slot] as usize] {
            slot += 1;
        }

        if slot == end {
            stack.pop();
            continue;
        }

        frame.1 = slot + 1;
        let next = columns[slot];
        visited[next as usize] = true;
        order.push(next);
        stack.push((next, offsets[next as usize]));
        max_distance = max_distance.max(stack.len() as u32 - 1);
    }

    TraversalResult {
        order,
        invalid_start: false,
        max_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrGraph {
        CsrGraph::from_edges([(0, 1), (0, 2), (1, 2), (2, 0)])
    }

    fn make_chain(n: NodeId) -> CsrGraph {
        CsrGraph::from_edges((0..n - 1).map(|i| (i, i + 1)))
    }

    fn make_star(leaves: NodeId) -> CsrGraph {
        CsrGraph::from_edges((1..=leaves).map(|i| (0, i)))
    }

    fn make_cycle(n: NodeId) -> CsrGraph {
        CsrGraph::from_edges((0..n).map(|i| (i, (i + 1) % n)))
    }

    /// Binary tree 0 -> {1, 2}, 1 -> {3, 4}, 2 -> {5, 6}.
    fn make_tree() -> CsrGraph {
        CsrGraph::from_edges([(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)])
    }

    /// Straightforward recursive DFS used as the reference order.
    fn dfs_recursive(graph: &CsrGraph, start: NodeId) -> Vec<NodeId> {
        fn visit(graph: &CsrGraph, node: NodeId, seen: &mut [bool], out: &mut Vec<NodeId>) {
            seen[node as usize] = true;
            out.push(node);
            for &next in graph.neighbor_slice(node) {
                if !seen[next as usize] {
                    visit(graph, next, seen, out);
                }
            }
        }
        let mut seen = vec![false; graph.node_count()];
        let mut out = Vec::new();
        visit(graph, start, &mut seen, &mut out);
        out
    }

    // --- BFS tests ---

    #[test]
    fn test_bfs_sample() {
        let result = bfs(&sample(), 0, None);
        assert_eq!(result.order, vec![0, 1, 2]);
        assert!(!result.invalid_start);
        assert_eq!(result.max_distance, 1);
    }

    #[test]
    fn test_bfs_chain() {
        let result = bfs(&make_chain(6), 0, None);
        assert_eq!(result.order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(result.max_distance, 5);
    }

    #[test]
    fn test_bfs_chain_depth_limited() {
        let result = bfs(&make_chain(10), 0, Some(3));
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert_eq!(result.max_distance, 3);
    }

    #[test]
    fn test_bfs_depth_zero_is_start_only() {
        let result = bfs(&make_chain(5), 2, Some(0));
        assert_eq!(result.order, vec![2]);
        assert_eq!(result.max_distance, 0);
    }

    #[test]
    fn test_bfs_layer_order() {
        let result = bfs(&make_tree(), 0, None);
        assert_eq!(result.order, vec![0, 1, 2, 3, 4, 5, 6]);

        let result = bfs(&make_tree(), 0, Some(1));
        assert_eq!(result.order, vec![0, 1, 2]);
    }

    #[test]
    fn test_bfs_star() {
        let result = bfs(&make_star(100), 0, Some(1));
        assert_eq!(result.len(), 101);
        assert_eq!(result.order[1..], (1..=100).collect::<Vec<NodeId>>()[..]);
    }

    #[test]
    fn test_bfs_follows_outgoing_only() {
        let g = make_chain(3);
        assert_eq!(bfs(&g, 2, None).order, vec![2]);
        assert_eq!(bfs(&g, 1, None).order, vec![1, 2]);
    }

    #[test]
    fn test_bfs_cycle_no_infinite_loop() {
        let result = bfs(&make_cycle(5), 0, Some(100));
        assert_eq!(result.order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_bfs_self_loop() {
        let g = CsrGraph::from_edges([(0, 0), (0, 1)]);
        assert_eq!(bfs(&g, 0, None).order, vec![0, 1]);
    }

    #[test]
    fn test_bfs_invalid_start() {
        let result = bfs(&sample(), 99, None);
        assert!(result.is_empty());
        assert!(result.invalid_start);
    }

    #[test]
    fn test_bfs_empty_graph() {
        let result = bfs(&CsrGraph::default(), 0, None);
        assert!(result.is_empty());
        assert!(result.invalid_start);
    }

    #[test]
    fn test_bfs_isolated_node() {
        let g = CsrGraph::from_edges([(0, 3)]);
        let result = bfs(&g, 2, None);
        assert_eq!(result.order, vec![2]);
        assert!(!result.invalid_start);
    }

    // --- DFS tests ---

    #[test]
    fn test_dfs_sample() {
        let result = dfs(&sample(), 0);
        assert_eq!(result.order, vec![0, 1, 2]);
        assert!(!result.invalid_start);
    }

    #[test]
    fn test_dfs_preorder_tree() {
        let result = dfs(&make_tree(), 0);
        assert_eq!(result.order, vec![0, 1, 3, 4, 2, 5, 6]);
        assert_eq!(result.max_distance, 2);
    }

    #[test]
    fn test_dfs_matches_recursive_order() {
        let g = CsrGraph::from_edges([
            (0, 3),
            (0, 1),
            (3, 1),
            (1, 4),
            (4, 0),
            (4, 2),
            (2, 3),
            (5, 0),
        ]);
        for start in 0..6 {
            assert_eq!(dfs(&g, start).order, dfs_recursive(&g, start), "start {start}");
        }
    }

    #[test]
    fn test_dfs_long_chain_does_not_overflow() {
        let n = 1_000_000;
        let result = dfs(&make_chain(n), 0);
        assert_eq!(result.len(), n as usize);
        assert_eq!(result.order.last(), Some(&(n - 1)));
        assert_eq!(result.max_distance, n - 1);
    }

    #[test]
    fn test_dfs_cycle() {
        assert_eq!(dfs(&make_cycle(4), 2).order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_dfs_invalid_start() {
        let result = dfs(&sample(), 99);
        assert!(result.is_empty());
        assert!(result.invalid_start);
    }

    #[test]
    fn test_dfs_and_bfs_reach_same_set() {
        let g = make_tree();
        for start in 0..7 {
            let mut a = dfs(&g, start).order;
            let mut b = bfs(&g, start, None).order;
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    // --- Subgraph tests ---

    #[test]
    fn test_subgraph_of_tree_layer() {
        let sub = extract_subgraph(&make_tree(), 0, Some(1), None);
        assert_eq!(sub.nodes, vec![0, 1, 2]);
        assert_eq!(sub.edges, vec![(0, 1), (0, 2)]);
        assert_eq!(sub.reached, 3);
        assert!(!sub.invalid_start);
    }

    #[test]
    fn test_subgraph_keeps_back_edges() {
        let sub = extract_subgraph(&make_cycle(4), 0, None, None);
        assert_eq!(sub.nodes, vec![0, 1, 2, 3]);
        assert_eq!(sub.edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn test_subgraph_node_limit() {
        let sub = extract_subgraph(&make_star(300), 0, None, Some(200));
        assert_eq!(sub.nodes.len(), 200);
        assert_eq!(sub.reached, 301);
        assert_eq!(sub.edges.len(), 199);
        assert!(sub.edges.iter().all(|&(u, v)| u == 0 && v < 200));
    }

    #[test]
    fn test_subgraph_invalid_start() {
        let sub = extract_subgraph(&sample(), 9, None, Some(10));
        assert!(sub.invalid_start);
        assert!(sub.nodes.is_empty());
        assert!(sub.edges.is_empty());
    }
}
