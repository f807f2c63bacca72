#![deny(unsafe_code)]

//! Command-line harness for the parsort library.
//!
//! Generates a seeded random array, sorts it with the chosen strategy, and
//! reports element count and elapsed wall time. The harness is an opaque
//! caller of the library: it supplies an array and consumes a sorted array.

use anyhow::{ensure, Context, Result};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use parsort_lib::{SortConfig, Strategy, DEFAULT_WORKERS};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Single-threaded baseline
    Sequential,
    /// One worker per static segment
    Segmented,
    /// Recursive splitting under a global worker budget
    Bounded,
    /// Persistent worker pool with a task queue
    Pooled,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::Segmented => Strategy::Segmented,
            StrategyArg::Bounded => Strategy::BoundedRecursive,
            StrategyArg::Pooled => Strategy::Pooled,
        }
    }
}

#[derive(Parser, Debug)]
#[command(styles = STYLES, version, about = "Parallel merge sort demo harness")]
struct Args {
    /// Number of elements to generate and sort
    #[arg(long, default_value_t = 1_000_000)]
    size: usize,

    /// Sorting strategy
    #[arg(long, value_enum, default_value = "segmented")]
    strategy: StrategyArg,

    /// Worker count (segments / pool threads / active-thread budget)
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Seed for the random input, for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the sorted array to stdout (intended for small sizes)
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut data: Vec<u64> = (0..args.size).map(|_| rng.gen()).collect();
    info!(
        "sorting {} elements with strategy {:?} ({} workers)",
        args.size, args.strategy, args.workers
    );

    let config = SortConfig::new(args.strategy.into(), args.workers);
    let start = Instant::now();
    config.sort(&mut data).context("sort failed")?;
    let elapsed = start.elapsed();

    ensure!(data.windows(2).all(|pair| pair[0] <= pair[1]), "output is not sorted");
    info!("sorted {} elements in {:.3?}", args.size, elapsed);

    if args.print {
        for value in &data {
            println!("{value}");
        }
    }

    Ok(())
}
