//! `percolation-stats`: estimate the site percolation threshold.
//!
//! Reads the grid size N and trial count T from stdin, runs T trials and
//! prints elapsed time, mean, standard deviation and the 95% interval.
//!
//! ```bash
//! echo "200 100" | cargo run --release --bin percolation-stats
//! echo "20 200" | cargo run --bin percolation-stats -- --seed 7 --parallel --json results/n20.json
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use percolation::error::ensure_positive;
use percolation::{ExperimentConfig, PercolationStats};

#[derive(Parser, Debug)]
#[command(
    name = "percolation-stats",
    version,
    about = "Monte Carlo estimate of the percolation threshold of an N-by-N grid"
)]
struct Args {
    /// Master seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Read N, T and options from a JSON config instead of stdin.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the run summary as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log level: off, trace, debug, info, warn, error.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

/// Parses `N T` from whitespace-separated text.
fn parse_sizes(input: &str) -> anyhow::Result<(usize, usize)> {
    let mut tokens = input.split_whitespace();
    let mut next = |name: &'static str| -> anyhow::Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| anyhow!("expected {name} on stdin"))?;
        let value: i64 = token
            .parse()
            .with_context(|| format!("{name} is not an integer: {token:?}"))?;
        Ok(ensure_positive(name, value)?)
    };
    let n = next("n")?;
    let trials = next("trials")?;
    Ok((n, trials))
}

/// Builds the run configuration from `--config` or from `N T` on `input`,
/// then applies the command-line overrides.
fn load_config(args: &Args, mut input: impl Read) -> anyhow::Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let mut text = String::new();
            input.read_to_string(&mut text).context("reading stdin")?;
            let (n, trials) = parse_sizes(&text)?;
            ExperimentConfig::new(n, trials)
        }
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.parallel |= args.parallel;
    Ok(config)
}

/// The four labelled result lines.
fn format_report(stats: &PercolationStats) -> String {
    format!(
        "time                    = {}\n\
         mean                    = {}\n\
         stddev                  = {}\n\
         95% confidence interval = {}, {}\n",
        stats.elapsed_sec(),
        stats.mean(),
        stats.stddev(),
        stats.confidence_lo(),
        stats.confidence_hi()
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = load_config(&args, io::stdin().lock())?;
    let stats = PercolationStats::with_config(&config)?;
    print!("{}", format_report(&stats));

    if let Some(path) = &args.json {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&stats.summary())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), seed = stats.seed(), "summary written");
    }

    Ok(())
}
