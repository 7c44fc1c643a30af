//! A single Monte Carlo percolation trial.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::grid::Percolation;

/// Outcome of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Index of the trial within its run.
    pub trial: usize,
    /// Sites opened when percolation was first detected.
    pub opens: usize,
    /// `opens / N²`, the trial's estimate of the percolation threshold.
    pub fraction: f64,
}

/// Opens uniformly random blocked sites of a fresh `n`-by-`n` grid until it
/// percolates.
///
/// Coordinates are drawn from `[1, n] × [1, n]` and redrawn when they hit an
/// already open site. The loop is bounded by `n²` opens: each iteration opens
/// one previously blocked site, and a fully open grid always percolates.
pub fn run_trial<R: Rng + ?Sized>(n: usize, trial: usize, rng: &mut R) -> Result<TrialResult> {
    let mut grid = Percolation::new(n)?;
    // `new` has already rejected sizes whose square overflows
    let sites = n * n;

    let mut opens = 0;
    while opens < sites {
        let (row, col) = loop {
            let row = rng.random_range(1..=n);
            let col = rng.random_range(1..=n);
            if !grid.is_open(row, col)? {
                break (row, col);
            }
        };
        grid.open(row, col)?;
        opens += 1;

        if grid.percolates() {
            break;
        }
    }

    let fraction = opens as f64 / sites as f64;
    debug!(trial, opens, fraction, "trial percolated");

    Ok(TrialResult {
        trial,
        opens,
        fraction,
    })
}
