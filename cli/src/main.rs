use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod load;
mod util;

use config::{OutputFormat, Overrides, Settings};
use error::Result;
use load::load_graph;
use util::{parse_depth, DepthLimit};

#[derive(Parser)]
#[command(name = "csr-graph")]
#[command(about = "Load a directed edge list into CSR form and query it", long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Maximum node ids listed in text output
    #[arg(long, global = true)]
    display_limit: Option<usize>,

    /// Refuse graphs whose CSR arrays exceed this many megabytes
    #[arg(long, global = true)]
    max_memory_mb: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts, average degree, memory use
    Stats {
        /// Edge-list file
        edges: PathBuf,
    },
    /// Node with the highest out-degree
    Critical {
        /// Edge-list file
        edges: PathBuf,
    },
    /// Breadth-first traversal from a start node
    Bfs {
        /// Edge-list file
        edges: PathBuf,
        /// Start node id
        #[arg(allow_negative_numbers = true)]
        start: i64,
        /// Maximum depth, -1 for unbounded
        #[arg(long, default_value = "-1", value_parser = parse_depth, allow_negative_numbers = true)]
        max_depth: DepthLimit,
    },
    /// Depth-first traversal from a start node
    Dfs {
        /// Edge-list file
        edges: PathBuf,
        /// Start node id
        #[arg(allow_negative_numbers = true)]
        start: i64,
    },
    /// Edges among the nodes a BFS reaches, capped at subgraph_node_limit nodes
    Subgraph {
        /// Edge-list file
        edges: PathBuf,
        /// Start node id
        #[arg(allow_negative_numbers = true)]
        start: i64,
        /// Maximum depth, -1 for unbounded
        #[arg(long, default_value = "-1", value_parser = parse_depth, allow_negative_numbers = true)]
        max_depth: DepthLimit,
    },
    /// Degrees and neighbors of one node
    Node {
        /// Edge-list file
        edges: PathBuf,
        /// Node id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        max_memory_mb: cli.max_memory_mb,
        display_limit: cli.display_limit,
        format: cli.json.then_some(OutputFormat::Json),
    };
    let settings = Settings::resolve(cli.config.as_deref(), &overrides)?;

    let load = |path: &Path| load_graph(path, &settings);

    match cli.command {
        Commands::Stats { edges } => commands::stats(&load(&edges)?, &settings),
        Commands::Critical { edges } => commands::critical(&load(&edges)?.graph, &settings),
        Commands::Bfs {
            edges,
            start,
            max_depth,
        } => commands::traverse_bfs(&load(&edges)?.graph, start, max_depth, &settings),
        Commands::Dfs { edges, start } => {
            commands::traverse_dfs(&load(&edges)?.graph, start, &settings)
        }
        Commands::Subgraph {
            edges,
            start,
            max_depth,
        } => commands::subgraph(&load(&edges)?.graph, start, max_depth, &settings),
        Commands::Node { edges, id } => commands::node(&load(&edges)?.graph, id, &settings),
    }
}
