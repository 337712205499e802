use std::collections::VecDeque;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use csr_graph_core::{bfs, dfs, AdjacencyBuilder, CsrGraph, NodeId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csr-graph-bench")]
#[command(about = "Build synthetic graphs into CSR form and time the core queries", long_about = None)]
struct Args {
    /// Which generator to run
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target node count per generated graph
    #[arg(default_value_t = 5_000_000)]
    nodes: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Tree,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense cliques connected by a thin bridge
    Barbell,
}

type Generator = fn(u32) -> Vec<(NodeId, NodeId)>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("csr-graph-bench");
    println!("===============");
    println!();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Tree => vec![("Branching tree", gen_tree)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        Mode::All => vec![
            ("Branching tree", gen_tree as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, args.nodes);
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: u32) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let gen_time = t.elapsed();

    // Same two-step path as the file loader: adjacency lists, then flatten.
    let t = Instant::now();
    let mut adjacency = AdjacencyBuilder::new(node_count as usize);
    for &(u, v) in &edges {
        if adjacency.append(u, v).is_err() {
            eprintln!("generator produced out-of-range edge {} -> {}", u, v);
            return;
        }
    }
    let graph = CsrGraph::build(node_count as usize, edges.len(), adjacency);
    drop(edges);
    let build_time = t.elapsed();

    println!(
        "Generated in {:.2}s, built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // BFS from node 0 (typically a hub or root)
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = bfs(&graph, 0, Some(depth));
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            result.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if result.len() >= graph.node_count() || result.max_distance < depth {
            println!("{:>8} (reachable set exhausted)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let result = dfs(&graph, 0);
    println!(
        "DFS from 0: {} nodes, stack depth {} in {:.1}ms",
        result.len(),
        result.max_distance,
        t.elapsed().as_secs_f64() * 1000.0
    );

    let t = Instant::now();
    match graph.max_degree_node() {
        Some((node, degree)) => println!(
            "Max out-degree: node {} with {} in {:.1}ms",
            node,
            degree,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        None => println!("Max out-degree: graph has no edges"),
    }

    let t = Instant::now();
    let in_degree = graph.in_degree(0);
    println!(
        "In-degree of 0 (full column scan): {} in {:.1}ms",
        in_degree,
        t.elapsed().as_secs_f64() * 1000.0
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as u32
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Branching tree: each node spawns 3 children, level by level.
///
/// Log depth with exponential width. Exercises wide BFS frontiers and a DFS
/// that descends the leftmost branch first.
fn gen_tree(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let branching = 3u32;
    let mut edges = Vec::with_capacity(node_count as usize);

    let mut next_id: u32 = 1;
    let mut frontier: VecDeque<u32> = VecDeque::from([0]);

    while next_id < node_count {
        let Some(parent) = frontier.pop_front() else {
            break;
        };
        for _ in 0..branching {
            if next_id >= node_count {
                break;
            }
            edges.push((parent, next_id));
            frontier.push_back(next_id);
            next_id += 1;
        }
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random endpoint of an existing edge.
/// Nodes with more edges are more likely to be picked. New nodes point at
/// older ones, so node 0 sits in a dense core.
fn gen_scale_free(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let edges_per_node = 10u32;
    let mut edges = Vec::with_capacity(node_count as usize * edges_per_node as usize);
    let mut rng = FastRng::new(12345);

    // Endpoint pool for O(1) preferential attachment sampling
    let mut endpoints: Vec<u32> = Vec::with_capacity(node_count as usize * edges_per_node as usize * 2);

    // Seed: small clique, both directions so the core is strongly connected
    let seed = 5u32.min(node_count);
    for i in 0..seed {
        for j in 0..seed {
            if i != j {
                edges.push((i, j));
                endpoints.push(i);
                endpoints.push(j);
            }
        }
    }

    for new_node in seed..node_count {
        for _ in 0..edges_per_node.min(new_node) {
            let target = endpoints[rng.next(endpoints.len() as u32) as usize];
            if target != new_node {
                edges.push((new_node, target));
                // Back-edge keeps new nodes reachable from the core.
                if rng.next(4) == 0 {
                    edges.push((target, new_node));
                }
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links forward to its K nearest ring neighbors, and each link is
/// rewired with probability p. High clustering with short path lengths.
fn gen_small_world(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let k = 10u32;
    let p = 0.05f64;
    let mut edges = Vec::with_capacity(node_count as usize * k as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((i as u64 + j as u64) % node_count as u64) as u32;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: ~10 uniform random edges per node. No structure.
fn gen_random(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let target_edges = node_count as usize * 10;
    let mut edges = Vec::with_capacity(target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push((from, to));
        }
    }

    edges
}

/// Barbell: two dense clusters joined by a thin bridge chain.
///
/// BFS from node 0 has to squeeze through the bridge; DFS wanders one
/// cluster before finding it.
fn gen_barbell(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let bridge_len = 10u32.min(node_count);
    let cluster = (node_count - bridge_len) / 2;
    let mut edges = Vec::with_capacity(cluster as usize * 40 + bridge_len as usize);
    let mut rng = FastRng::new(99999);

    let mut wire_cluster = |edges: &mut Vec<(NodeId, NodeId)>, base: u32| {
        for i in 0..cluster {
            for _ in 0..20u32.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    edges.push((base + i, base + target));
                }
            }
        }
    };

    // Cluster A: 0..cluster
    wire_cluster(&mut edges, 0);

    // Bridge: chain from last node of A through the bridge nodes into B
    let bridge_start = cluster;
    let b_start = bridge_start + bridge_len;
    if cluster > 0 {
        edges.push((cluster - 1, bridge_start));
    }
    for id in bridge_start + 1..b_start {
        edges.push((id - 1, id));
    }
    if cluster > 0 && bridge_len > 0 {
        edges.push((b_start - 1, b_start));
    }

    // Cluster B: after the bridge
    wire_cluster(&mut edges, b_start);

    edges
}
