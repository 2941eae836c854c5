//! CLI facade for the graphcut balanced-partitioning library.
//!
//! One subcommand per algorithm plus the two random-graph generators.
//! Matrices travel in the nested-brace text format (`{{0,1},{1,0}}`), read
//! from `--input`/`--weights` files or stdin; partition results are printed
//! as a JSON object carrying the padded partition matrix and the elapsed
//! time in milliseconds:
//!
//! ```text
//! {"PartitionMatrix":"{{0,2},{1,3}}","ExecutionTime":4}
//! ```
//!
//! Errors are printed to stderr and the process exits non-zero — the
//! command-line analog of a 400 response.
//!
//! Usage examples:
//!  graphcut random-graph --vertices 12 --max-edges 4 --seed 7
//!  graphcut spectral --input adjacency.txt
//!  graphcut geometric -k 4 --input adjacency.txt --weights weights.txt
//!  graphcut logical -k 2 --input adjacency.txt --solver clingo

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ndarray::Array2;
use serde_json::json;

use graphcut::asp::{AspConfig, LogicalProgramming};
use graphcut::utils::{logging, rng};
use graphcut::{algorithms, generator, serialize, Graph, Partitioner};

/// CLI entrypoint.
#[derive(Parser)]
#[command(
    name = "graphcut",
    about = "Balanced k-way partitioning of undirected graphs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random adjacency matrix and print it in brace format.
    RandomGraph(RandomGraphArgs),

    /// Generate a random weights matrix over an existing adjacency.
    RandomWeights(RandomWeightsArgs),

    /// Spectral bisection (k fixed at 2).
    Spectral(UnweightedArgs),

    /// Inertial bisection over edge weights (k fixed at 2).
    Inertial(WeightedArgs),

    /// Recursive geometric partitioning over edge weights.
    Geometric(WeightedKArgs),

    /// Kernighan-Lin local-search partitioning.
    KernighanLin(UnweightedKArgs),

    /// Greedy BFS-growth partitioning.
    Greedy(UnweightedKArgs),

    /// Exhaustive search minimizing cut edges.
    BruteForce(UnweightedKArgs),

    /// Exhaustive search minimizing cut weight.
    BruteForceWeighted(WeightedKArgs),

    /// Partition through an external ASP solver.
    Logical(LogicalArgs),

    /// Weighted partitioning through an external ASP solver.
    LogicalWeighted(LogicalWeightedArgs),
}

#[derive(Args)]
struct RandomGraphArgs {
    /// Number of vertices.
    #[arg(long)]
    vertices: usize,

    /// Maximum degree per vertex.
    #[arg(long)]
    max_edges: usize,

    /// RNG seed (falls back to RNG_SEED, then entropy).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct RandomWeightsArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Smallest weight (must be positive).
    #[arg(long)]
    min: f64,

    /// Largest weight.
    #[arg(long)]
    max: f64,

    /// RNG seed (falls back to RNG_SEED, then entropy).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct UnweightedArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct UnweightedKArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of groups.
    #[arg(short, default_value_t = 2)]
    k: usize,

    /// RNG seed for randomized algorithms.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct WeightedArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Weights matrix file in brace format.
    #[arg(long)]
    weights: PathBuf,
}

#[derive(Args)]
struct WeightedKArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Weights matrix file in brace format.
    #[arg(long)]
    weights: PathBuf,

    /// Number of groups.
    #[arg(short, default_value_t = 2)]
    k: usize,

    /// RNG seed for randomized algorithms.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct LogicalArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of groups (n must be divisible by k).
    #[arg(short, default_value_t = 2)]
    k: usize,

    /// ASP solver binary.
    #[arg(long, default_value = "clingo")]
    solver: PathBuf,

    /// Where to stage the emitted logic program.
    #[arg(long)]
    program_path: Option<PathBuf>,
}

#[derive(Args)]
struct LogicalWeightedArgs {
    /// Adjacency matrix file in brace format; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Weights matrix file in brace format.
    #[arg(long)]
    weights: PathBuf,

    /// Number of groups (n must be divisible by k).
    #[arg(short, default_value_t = 2)]
    k: usize,

    /// ASP solver binary.
    #[arg(long, default_value = "clingo")]
    solver: PathBuf,

    /// Where to stage the emitted logic program.
    #[arg(long)]
    program_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::RandomGraph(args) => {
            let mut rng = rng::rng_with(args.seed);
            let a = generator::random_adjacency(args.vertices, args.max_edges, &mut rng)?;
            println!("{}", serialize::format_matrix(&a));
        }
        Commands::RandomWeights(args) => {
            let a = read_matrix(args.input.as_deref())?;
            let mut rng = rng::rng_with(args.seed);
            let w = generator::random_weights(&a, args.min, args.max, &mut rng)?;
            println!("{}", serialize::format_matrix(&w));
        }
        Commands::Spectral(args) => {
            let graph = unweighted_graph(args.input.as_deref())?;
            run_named("spectral", None, &graph, 2)?;
        }
        Commands::Inertial(args) => {
            let graph = weighted_graph(args.input.as_deref(), &args.weights)?;
            run_named("inertial", None, &graph, 2)?;
        }
        Commands::Geometric(args) => {
            let graph = weighted_graph(args.input.as_deref(), &args.weights)?;
            run_named("geometric", args.seed, &graph, args.k)?;
        }
        Commands::KernighanLin(args) => {
            let graph = unweighted_graph(args.input.as_deref())?;
            run_named("kernighan-lin", args.seed, &graph, args.k)?;
        }
        Commands::Greedy(args) => {
            let graph = unweighted_graph(args.input.as_deref())?;
            run_named("greedy", args.seed, &graph, args.k)?;
        }
        Commands::BruteForce(args) => {
            let graph = unweighted_graph(args.input.as_deref())?;
            run_named("brute-force", args.seed, &graph, args.k)?;
        }
        Commands::BruteForceWeighted(args) => {
            let graph = weighted_graph(args.input.as_deref(), &args.weights)?;
            run_named("brute-force-weighted", args.seed, &graph, args.k)?;
        }
        Commands::Logical(args) => {
            let graph = unweighted_graph(args.input.as_deref())?;
            let config = asp_config(args.solver, args.program_path);
            run(
                &mut LogicalProgramming::new(config, false),
                &graph,
                args.k,
            )?;
        }
        Commands::LogicalWeighted(args) => {
            let graph = weighted_graph(args.input.as_deref(), &args.weights)?;
            let config = asp_config(args.solver, args.program_path);
            run(&mut LogicalProgramming::new(config, true), &graph, args.k)?;
        }
    }
    Ok(())
}

fn asp_config(solver: PathBuf, program_path: Option<PathBuf>) -> AspConfig {
    let default = AspConfig::default();
    AspConfig {
        solver,
        program_path: program_path.unwrap_or(default.program_path),
    }
}

/// Read a brace-format matrix from a file, or stdin when no path is given.
fn read_matrix(path: Option<&std::path::Path>) -> Result<Array2<f64>> {
    let text = match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading matrix from stdin")?;
            buffer
        }
    };
    Ok(serialize::parse_matrix(&text)?)
}

fn unweighted_graph(input: Option<&std::path::Path>) -> Result<Graph> {
    let a = read_matrix(input)?;
    Ok(Graph::new(a)?)
}

fn weighted_graph(input: Option<&std::path::Path>, weights: &std::path::Path) -> Result<Graph> {
    let a = read_matrix(input)?;
    let w = read_matrix(Some(weights))?;
    Ok(Graph::with_weights(a, w)?)
}

fn run_named(name: &str, seed: Option<u64>, graph: &Graph, k: usize) -> Result<()> {
    let mut algorithm =
        algorithms::create(name, seed).with_context(|| format!("unknown algorithm '{name}'"))?;
    run(algorithm.as_mut(), graph, k)
}

/// Run one algorithm and print the standard response shape.
fn run(algorithm: &mut dyn Partitioner, graph: &Graph, k: usize) -> Result<()> {
    let started = Instant::now();
    let partition = algorithm.partition(graph, k)?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let response = json!({
        "PartitionMatrix": serialize::format_matrix(&partition.to_padded_matrix()),
        "ExecutionTime": elapsed_ms,
    });
    println!("{response}");
    Ok(())
}
