//! Integration tests: load edge lists from disk and query the result.

use std::io::Write;

use csr_graph_core::{bfs, dfs, CsrGraph, GraphError};
use tempfile::NamedTempFile;

fn write_edge_list(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_sample_scenario() {
    let file = write_edge_list("0 1\n0 2\n1 2\n2 0\n");
    let g = CsrGraph::load(file.path()).unwrap();

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 4);
    assert!(g.is_directed());

    assert_eq!(
        (g.out_degree(0), g.out_degree(1), g.out_degree(2)),
        (2, 1, 1)
    );
    assert_eq!((g.in_degree(0), g.in_degree(1), g.in_degree(2)), (1, 1, 2));

    assert_eq!(bfs(&g, 0, None).order, vec![0, 1, 2]);
    assert_eq!(dfs(&g, 0).order, vec![0, 1, 2]);
    assert_eq!(g.max_degree_node(), Some((0, 2)));

    let invalid = bfs(&g, 99, None);
    assert!(invalid.order.is_empty());
    assert!(invalid.invalid_start);
}

#[test]
fn load_twice_is_identical() {
    let file = write_edge_list("5 1\n0 3\n5 2\n3 3\n1 0\n0 5\n");
    let a = CsrGraph::load(file.path()).unwrap();
    let b = CsrGraph::load(file.path()).unwrap();
    assert_eq!(a.row_offsets(), b.row_offsets());
    assert_eq!(a.column_indices(), b.column_indices());
    assert_eq!(a.edge_values(), b.edge_values());
}

#[test]
fn load_truncates_malformed_tail() {
    let file = write_edge_list("0 1\n1 2\n2 three\n3 4\n");
    let g = CsrGraph::load(file.path()).unwrap();
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.node_count(), 3);
}

#[test]
fn load_large_ids_without_header() {
    let file = write_edge_list("0 11342\n11342 7\n");
    let g = CsrGraph::load(file.path()).unwrap();
    assert_eq!(g.node_count(), 11343);
    assert_eq!(g.neighbors(11342), vec![7]);
    assert_eq!(bfs(&g, 0, None).order, vec![0, 11342, 7]);
}

#[test]
fn load_empty_file() {
    let file = write_edge_list("");
    let g = CsrGraph::load(file.path()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.max_degree_node(), None);
    assert!(dfs(&g, 0).invalid_start);
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    match CsrGraph::load(&missing) {
        Err(GraphError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn load_matches_in_memory_build() {
    let edges = [(2, 0), (0, 1), (2, 1), (1, 1), (0, 2)];
    let text: String = edges.iter().map(|(u, v)| format!("{u} {v}\n")).collect();
    let file = write_edge_list(&text);
    assert_eq!(CsrGraph::load(file.path()).unwrap(), CsrGraph::from_edges(edges));
}

#[test]
fn load_with_limit_refuses_huge_id_up_front() {
    let file = write_edge_list("0 4000000000\n");
    match CsrGraph::load_with_limit(file.path(), 64 * 1024 * 1024) {
        Err(GraphError::MemoryLimit { max_bytes, .. }) => assert_eq!(max_bytes, 64 * 1024 * 1024),
        other => panic!("expected MemoryLimit, got {other:?}"),
    }
}

#[test]
fn load_with_limit_accepts_small_graph() {
    let file = write_edge_list("0 1\n0 2\n1 2\n2 0\n");
    let g = CsrGraph::load_with_limit(file.path(), 1024 * 1024).unwrap();
    assert_eq!(g, CsrGraph::load(file.path()).unwrap());
}

#[test]
fn subgraph_from_loaded_file() {
    let file = write_edge_list("0 1\n0 2\n1 2\n2 0\n2 3\n");
    let g = CsrGraph::load(file.path()).unwrap();
    let sub = csr_graph_core::extract_subgraph(&g, 0, Some(1), None);
    assert_eq!(sub.nodes, vec![0, 1, 2]);
    assert_eq!(sub.edges, vec![(0, 1), (0, 2), (1, 2), (2, 0)]);
}
