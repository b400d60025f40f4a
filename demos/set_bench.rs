//! # Set benchmark
//!
//! Runs the ordered, hashed and flat set workloads over the same seeded key
//! sequence and prints one row per variant. With no flags this is the reference
//! workload: seed 1, fields in `[1, 20]`, one million draws.
//!
//! Run with: `cargo run --release --features json --example set_bench -- --iters 100000`

#![allow(clippy::print_stdout, clippy::print_stderr, clippy::expect_used)]

use std::sync::Arc;

use clap::Parser;
use setbench::telemetry::{TracingObserver, ViolationObserver};
use setbench::{BenchConfig, SetKind};

#[derive(Parser)]
#[command(about = "Compare ordered, hashed and flat sets over composite keys")]
struct Opt {
    /// Generator seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,
    /// Inclusive lower bound of every key field
    #[arg(long, default_value_t = 1)]
    low: u64,
    /// Inclusive upper bound of every key field
    #[arg(long, default_value_t = 20)]
    high: u64,
    /// Keys drawn and inserted per variant
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    iters: usize,
    /// Variants to run, in order (ordered_set, hash_set, flat_set). Defaults to all.
    #[arg(short, long, value_delimiter = ',')]
    variant: Vec<SetKind>,
    /// Skip pre-reserving capacity
    #[arg(long)]
    no_reserve: bool,
    /// Traverse without folding key hashes
    #[arg(long)]
    no_traversal_hash: bool,
    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Log every phase at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    let level = if opt.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .expect("setting up tracing subscriber failed");

    let mut config = BenchConfig::original()
        .with_seed(opt.seed)
        .with_range(opt.low, opt.high)?
        .with_iterations(opt.iters)?
        .with_reserve_capacity(!opt.no_reserve)
        .with_traversal_hash(!opt.no_traversal_hash);
    if !opt.variant.is_empty() {
        config = config.with_variants(opt.variant)?;
    }

    let observer: Arc<dyn ViolationObserver> = Arc::new(TracingObserver::new());
    let report = setbench::run_observed(&config, Some(&observer))?;

    if opt.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
