//! Site percolation on an N-by-N grid
//! ==================================
//! Monte Carlo estimate of the percolation threshold: open random sites of a
//! fresh grid until the top row connects to the bottom row, record the open
//! fraction, repeat T times and report mean, spread and a 95% interval.

pub mod config;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod stats;

pub use config::ExperimentConfig;
pub use error::{PercolationError, Result};
pub use experiment::{run_trial, TrialResult};
pub use grid::Percolation;
pub use stats::{PercolationStats, StatsSummary};
