//! One function per subcommand: run the query, then print it as text or JSON.
//!
//! Start and node ids arrive as signed values. A negative id is handled the
//! same way as one past the end of the graph: traversals report an invalid
//! start, `node` fails with `InvalidNode`.

use std::time::Instant;

use csr_graph_core::{bfs, dfs, extract_subgraph, CsrGraph, Subgraph, TraversalResult};
use serde_json::{json, Value};

use crate::config::{OutputFormat, Settings};
use crate::error::{CliError, Result};
use crate::load::LoadedGraph;
use crate::util::{format_ids, node_id, DepthLimit};

pub fn stats(loaded: &LoadedGraph, settings: &Settings) -> Result<()> {
    let stats = loaded.graph.stats();
    match settings.format {
        OutputFormat::Json => print_json(&json!({
            "node_count": stats.node_count,
            "edge_count": stats.edge_count,
            "directed": stats.directed,
            "average_degree": stats.average_degree,
            "memory_bytes": stats.memory_bytes,
            "load_time_ms": loaded.load_time_ms,
        })),
        OutputFormat::Text => {
            println!("=== Graph statistics ===");
            println!("Nodes:          {}", stats.node_count);
            println!("Edges:          {}", stats.edge_count);
            println!(
                "Type:           {}",
                if stats.directed { "directed" } else { "undirected" }
            );
            println!("Average degree: {:.4}", stats.average_degree);
            println!(
                "Memory (CSR):   {:.2} MB",
                stats.memory_bytes as f64 / 1_048_576.0
            );
            println!("Load time:      {:.1} ms", loaded.load_time_ms);
            Ok(())
        }
    }
}

pub fn critical(graph: &CsrGraph, settings: &Settings) -> Result<()> {
    let t = Instant::now();
    let best = graph.max_degree_node();
    let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;

    match settings.format {
        OutputFormat::Json => print_json(&json!({
            "node_id": best.map(|(node, _)| node),
            "out_degree": best.map_or(0, |(_, degree)| degree),
            "elapsed_ms": elapsed_ms,
        })),
        OutputFormat::Text => {
            match best {
                Some((node, degree)) => {
                    println!("Most connected node: {} (out-degree {})", node, degree)
                }
                None => println!("Graph has no edges"),
            }
            Ok(())
        }
    }
}

pub fn traverse_bfs(
    graph: &CsrGraph,
    start: i64,
    depth: DepthLimit,
    settings: &Settings,
) -> Result<()> {
    let t = Instant::now();
    let result = run_bfs(graph, start, depth);
    let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;
    print_traversal("BFS", graph, start, &result, elapsed_ms, settings)
}

pub fn traverse_dfs(graph: &CsrGraph, start: i64, settings: &Settings) -> Result<()> {
    let t = Instant::now();
    let result = run_dfs(graph, start);
    let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;
    print_traversal("DFS", graph, start, &result, elapsed_ms, settings)
}

pub fn subgraph(
    graph: &CsrGraph,
    start: i64,
    depth: DepthLimit,
    settings: &Settings,
) -> Result<()> {
    let t = Instant::now();
    let sub = run_subgraph(graph, start, depth, settings.subgraph_node_limit);
    let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;

    match settings.format {
        OutputFormat::Json => print_json(&subgraph_json(start, &sub, elapsed_ms)),
        OutputFormat::Text => {
            if sub.invalid_start {
                println!(
                    "Subgraph: invalid start node {} (valid range 0..{})",
                    start,
                    graph.node_count()
                );
                return Ok(());
            }
            println!(
                "Subgraph from {}: {} of {} reached nodes, {} edges ({:.3} ms)",
                start,
                sub.nodes.len(),
                sub.reached,
                sub.edges.len(),
                elapsed_ms
            );
            for &(u, v) in sub.edges.iter().take(settings.display_limit) {
                println!("  {} -> {}", u, v);
            }
            if sub.edges.len() > settings.display_limit {
                println!("  ... (and {} more)", sub.edges.len() - settings.display_limit);
            }
            Ok(())
        }
    }
}

pub fn node(graph: &CsrGraph, id: i64, settings: &Settings) -> Result<()> {
    let summary = match node_id(id) {
        Some(node) => graph.node_summary(node)?,
        None => {
            return Err(CliError::InvalidNode {
                node: id,
                node_count: graph.node_count(),
            })
        }
    };
    match settings.format {
        OutputFormat::Json => print_json(&json!({
            "node_id": summary.node_id,
            "out_degree": summary.out_degree,
            "in_degree": summary.in_degree,
            "total_degree": summary.total_degree,
            "neighbors": summary.neighbors,
        })),
        OutputFormat::Text => {
            println!("Node {}", summary.node_id);
            println!("--------------------------------");
            println!("Out-degree:   {}", summary.out_degree);
            println!("In-degree:    {}", summary.in_degree);
            println!("Total degree: {}", summary.total_degree);
            println!("Neighbors:    {}", summary.neighbors.len());
            if !summary.neighbors.is_empty() {
                println!(
                    "Neighbor ids: {}",
                    format_ids(&summary.neighbors, settings.neighbor_display_limit)
                );
            }
            Ok(())
        }
    }
}

fn run_bfs(graph: &CsrGraph, start: i64, depth: DepthLimit) -> TraversalResult {
    match node_id(start) {
        Some(node) => bfs(graph, node, depth.0),
        None => invalid_start(),
    }
}

fn run_dfs(graph: &CsrGraph, start: i64) -> TraversalResult {
    match node_id(start) {
        Some(node) => dfs(graph, node),
        None => invalid_start(),
    }
}

fn run_subgraph(graph: &CsrGraph, start: i64, depth: DepthLimit, node_limit: usize) -> Subgraph {
    match node_id(start) {
        Some(node) => extract_subgraph(graph, node, depth.0, Some(node_limit)),
        None => Subgraph {
            invalid_start: true,
            ..Default::default()
        },
    }
}

fn invalid_start() -> TraversalResult {
    TraversalResult {
        invalid_start: true,
        ..Default::default()
    }
}

fn traversal_json(kind: &str, start: i64, result: &TraversalResult, elapsed_ms: f64) -> Value {
    json!({
        "algorithm": kind,
        "start": start,
        "invalid_start": result.invalid_start,
        "count": result.order.len(),
        "max_distance": result.max_distance,
        "order": result.order,
        "elapsed_ms": elapsed_ms,
    })
}

fn subgraph_json(start: i64, sub: &Subgraph, elapsed_ms: f64) -> Value {
    json!({
        "start": start,
        "invalid_start": sub.invalid_start,
        "reached": sub.reached,
        "nodes": sub.nodes,
        "edges": sub.edges,
        "elapsed_ms": elapsed_ms,
    })
}

fn print_traversal(
    kind: &str,
    graph: &CsrGraph,
    start: i64,
    result: &TraversalResult,
    elapsed_ms: f64,
    settings: &Settings,
) -> Result<()> {
    match settings.format {
        OutputFormat::Json => print_json(&traversal_json(kind, start, result, elapsed_ms)),
        OutputFormat::Text => {
            if result.invalid_start {
                println!(
                    "{}: invalid start node {} (valid range 0..{})",
                    kind,
                    start,
                    graph.node_count()
                );
                return Ok(());
            }
            println!(
                "{}: nodes reached from {} (total {}, {:.3} ms):",
                kind,
                start,
                result.order.len(),
                elapsed_ms
            );
            println!("{}", format_ids(&result.order, settings.display_limit));
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
