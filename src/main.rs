use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ziptree::notation::{parse_tree, NotationConfig, EXAMPLE};
use ziptree::query::{QueryConfig, DEFAULT_MAX_DISTANCE};
use ziptree::tree::{Container, ZipTree};

#[derive(Parser, Debug)]
#[command(name = "ziptree", about = "Bounded-distance seed queries over zip trees")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct TreeSource {
    /// Zip tree in bracket notation (default: built-in example).
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Deepest nesting accepted when reading the tree.
    #[arg(long, default_value_t = 1024)]
    max_depth: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List seeds with their distance to the tree's right end.
    RightToLeft {
        #[command(flatten)]
        source: TreeSource,
        /// Largest distance reported.
        #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
        max_distance: i64,
    },
    /// List seeds left to right with their containment paths.
    LeftToRight {
        #[command(flatten)]
        source: TreeSource,
    },
    /// List seeds reachable leftward/outward from one seed.
    Reachable {
        #[command(flatten)]
        source: TreeSource,
        /// Seed to start from.
        #[arg(long)]
        seed: String,
        /// Largest distance reported.
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE, allow_negative_numbers = true)]
        max_distance: i64,
    },
    /// List every pair of seeds within a bound.
    Pairs {
        #[command(flatten)]
        source: TreeSource,
        /// Largest distance reported.
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE, allow_negative_numbers = true)]
        max_distance: i64,
        /// Also print each pair with its seeds swapped.
        #[arg(long)]
        symmetric: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::RightToLeft {
            source,
            max_distance,
        } => run_right_to_left(&load_tree(&source)?, max_distance),
        Commands::LeftToRight { source } => run_left_to_right(&load_tree(&source)?),
        Commands::Reachable {
            source,
            seed,
            max_distance,
        } => run_reachable(&load_tree(&source)?, &seed, max_distance)?,
        Commands::Pairs {
            source,
            max_distance,
            symmetric,
        } => {
            let config = QueryConfig::with_max_distance(max_distance).with_symmetric(symmetric);
            run_pairs(&load_tree(&source)?, &config)
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tree(source: &TreeSource) -> Result<ZipTree<String>> {
    let config = NotationConfig {
        max_depth: source.max_depth,
    };
    match &source.tree {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read tree from {}", path.display()))?;
            parse_tree(&text, &config)
                .with_context(|| format!("failed to parse tree in {}", path.display()))
        }
        None => parse_tree(EXAMPLE, &config).context("built-in example tree is malformed"),
    }
}

fn run_right_to_left(tree: &ZipTree<String>, max_distance: i64) {
    println!("Seeds in right-to-left order");
    for (seed, distance) in tree.seeds_right_to_left(max_distance) {
        println!("seed={}\tdistance_to_right_end={}", seed, distance);
    }
}

fn run_left_to_right(tree: &ZipTree<String>) {
    println!("Seeds in left-to-right order");
    for (seed, path) in tree.seeds_left_to_right() {
        let levels: Vec<String> = path
            .steps()
            .iter()
            .map(|step| match step.container {
                Container::Chain(_) => format!("chain[{}]", step.index),
                Container::Snarl(_) => format!("snarl[{}]", step.index),
            })
            .collect();
        println!("seed={}\tdepth={}\tpath={}", seed, path.depth(), levels.join(" < "));
    }
}

fn run_reachable(tree: &ZipTree<String>, seed: &str, max_distance: i64) -> Result<()> {
    let walk = tree
        .reachable_from(&seed.to_string(), max_distance)
        .ok_or_else(|| anyhow::anyhow!("seed '{}' not found in tree", seed))?;

    println!("Seeds reachable from {} within {}", seed, max_distance);
    for (reached, distance) in walk {
        println!("seed={}\tdistance={}", reached, distance);
    }
    Ok(())
}

fn run_pairs(tree: &ZipTree<String>, config: &QueryConfig) {
    println!("All pairs of distances <= {}", config.max_distance);
    for pair in tree.pairs_within(config) {
        println!(
            "to={}\tfrom={}\tdistance={}",
            pair.origin, pair.reached, pair.distance
        );
    }
}
