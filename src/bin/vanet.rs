//! CLI entry point for the `vanet` command-line tool.

use std::process;

use clap::{Args, Parser, Subcommand};

use vanet_graph::cli::commands;
use vanet_graph::graph::GraphBackend;
use vanet_graph::hash::HashFunction;
use vanet_graph::map::MapConfig;
use vanet_graph::types::{VanetError, VanetResult, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

#[derive(Parser)]
#[command(
    name = "vanet",
    about = "VANET simulation over hash-map backed weighted graphs"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Seed for the random generator (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Table settings shared by the graph-building commands.
#[derive(Args)]
struct TableArgs {
    /// Hash function: modulus, multiplicative, xor
    #[arg(long, default_value = "modulus")]
    hash: String,
    /// Initial bucket count of the vertex map
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Load factor that triggers a resize
    #[arg(long, default_value_t = DEFAULT_LOAD_FACTOR)]
    load_factor: f32,
    /// Never resize the vertex map
    #[arg(long)]
    fixed: bool,
}

impl TableArgs {
    fn config(&self) -> VanetResult<MapConfig> {
        let config = MapConfig::default()
            .with_hash_function(HashFunction::from_name(&self.hash)?)
            .with_capacity(self.capacity)
            .with_load_factor(self.load_factor)
            .resizable(!self.fixed);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a random VANET and answer random shortest-path queries
    Simulate {
        /// Graph backing: chained, tree, list
        #[arg(long, default_value = "chained")]
        backend: String,
        /// Number of vehicles
        #[arg(long, default_value = "10")]
        vehicles: usize,
        /// Vehicles that leave range before querying
        #[arg(long, default_value = "0")]
        leaving: usize,
        /// Number of random queries
        #[arg(long, default_value = "5")]
        queries: usize,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Collision rate of every hash function for several fleet sizes
    Hashing {
        /// Comma-separated fleet sizes
        #[arg(long, default_value = "10,50,100,500,1000,2500,5000")]
        counts: String,
        /// Bucket count (defaults to the fleet size)
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Time graph construction and queries on every backing
    Compare {
        /// Comma-separated fleet sizes
        #[arg(long, default_value = "10,50,100,500")]
        counts: String,
        /// Queries per fleet size
        #[arg(long, default_value = "10")]
        queries: usize,
        #[command(flatten)]
        table: TableArgs,
    },
}

fn parse_counts(counts: &str) -> Vec<usize> {
    counts
        .split(',')
        .filter_map(|t| t.trim().parse().ok())
        .collect()
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            backend,
            vehicles,
            leaving,
            queries,
            table,
        } => GraphBackend::from_name(&backend).and_then(|backend| {
            commands::cmd_simulate(
                backend,
                table.config()?,
                vehicles,
                leaving,
                queries,
                cli.seed,
                json,
            )
        }),
        Commands::Hashing { counts, capacity } => {
            commands::cmd_hashing(&parse_counts(&counts), capacity, cli.seed, json)
        }
        Commands::Compare {
            counts,
            queries,
            table,
        } => table.config().and_then(|config| {
            commands::cmd_compare(&parse_counts(&counts), queries, config, cli.seed, json)
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            VanetError::InvalidConfiguration(_)
            | VanetError::UnsupportedMapType(_)
            | VanetError::UnsupportedHashFunction(_) => 2,
            VanetError::VertexNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
