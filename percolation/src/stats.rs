//! Aggregate statistics over independent percolation trials.

use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::experiment::{run_trial, TrialResult};

/// z-score of the two-sided 95% normal interval.
pub const CONFIDENCE_95: f64 = 1.96;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divisor `len - 1`). `NaN` for fewer than two values.
pub fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mu = mean(values);
    let ss: f64 = values.iter().map(|&x| (x - mu).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Generator for trial `trial` of a run seeded with `seed`.
///
/// Each trial reads its own ChaCha stream, so its draws depend only on
/// `(seed, trial)` and not on scheduling.
pub fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

/// Serializable record of a finished run.
///
/// Write-only: with T = 1 the spread fields are `NaN`, which JSON stores as
/// `null`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub grid_size: usize,
    pub trials: usize,
    pub seed: u64,
    pub parallel: bool,
    pub mean: f64,
    pub stddev: f64,
    pub confidence_lo: f64,
    pub confidence_hi: f64,
    pub elapsed_sec: f64,
    pub fractions: Vec<f64>,
}

/// Runs T trials on an N-by-N grid and summarises their thresholds.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    config: ExperimentConfig,
    seed: u64,
    results: Vec<TrialResult>,
    fractions: Vec<f64>,
    mean: f64,
    stddev: f64,
    elapsed_sec: f64,
}

impl PercolationStats {
    /// Sequential run with a freshly drawn seed.
    pub fn new(n: usize, trials: usize) -> Result<Self> {
        Self::with_config(&ExperimentConfig::new(n, trials))
    }

    pub fn with_config(config: &ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let n = config.grid_size;

        info!(
            n,
            trials = config.trials,
            seed,
            parallel = config.parallel,
            "starting percolation trials"
        );
        let start = Instant::now();

        let results: Vec<TrialResult> = if config.parallel {
            (0..config.trials)
                .into_par_iter()
                .map(|k| run_trial(n, k, &mut trial_rng(seed, k)))
                .collect::<Result<_>>()?
        } else {
            (0..config.trials)
                .map(|k| run_trial(n, k, &mut trial_rng(seed, k)))
                .collect::<Result<_>>()?
        };

        let elapsed_sec = start.elapsed().as_secs_f64();
        let fractions: Vec<f64> = results.iter().map(|r| r.fraction).collect();
        let mean = mean(&fractions);
        let stddev = stddev(&fractions);

        info!(mean, stddev, elapsed_sec, "percolation trials complete");

        Ok(Self {
            config: config.clone(),
            seed,
            results,
            fractions,
            mean,
            stddev,
            elapsed_sec,
        })
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold; `NaN` when T = 1.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// `1.96 * stddev / sqrt(T)`.
    pub fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev / (self.config.trials as f64).sqrt()
    }

    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    /// Per-trial results in trial order.
    pub fn trials(&self) -> &[TrialResult] {
        &self.results
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            grid_size: self.config.grid_size,
            trials: self.config.trials,
            seed: self.seed,
            parallel: self.config.parallel,
            mean: self.mean,
            stddev: self.stddev,
            confidence_lo: self.confidence_lo(),
            confidence_hi: self.confidence_hi(),
            elapsed_sec: self.elapsed_sec,
            fractions: self.fractions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PercolationError;

    #[test]
    fn mean_and_sample_stddev() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        // Sum of squares 32 over 7
        assert!((stddev(&xs) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(stddev(&[]).is_nan());
        assert!(stddev(&[0.5]).is_nan());
    }

    #[test]
    fn zero_arguments_are_rejected() {
        assert!(matches!(
            PercolationStats::new(0, 10),
            Err(PercolationError::InvalidArgument { name: "n", .. })
        ));
        assert!(matches!(
            PercolationStats::new(10, 0),
            Err(PercolationError::InvalidArgument { name: "trials", .. })
        ));
    }

    #[test]
    fn single_site_grid_has_threshold_one() {
        let stats = PercolationStats::new(1, 25).unwrap();
        assert!(stats.fractions().iter().all(|&f| f == 1.0));
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
        assert_eq!(stats.confidence_lo(), 1.0);
        assert_eq!(stats.confidence_hi(), 1.0);
    }

    #[test]
    fn single_trial_has_undefined_spread() {
        let stats = PercolationStats::with_config(&ExperimentConfig::new(5, 1).with_seed(3)).unwrap();
        assert!(stats.mean().is_finite());
        assert!(stats.stddev().is_nan());
        assert!(stats.confidence_lo().is_nan());
        assert!(stats.confidence_hi().is_nan());
    }

    #[test]
    fn single_trial_summary_writes_null_spread() {
        let stats = PercolationStats::with_config(&ExperimentConfig::new(4, 1).with_seed(9)).unwrap();
        let json = serde_json::to_value(stats.summary()).unwrap();
        assert!(json["mean"].is_f64());
        assert!(json["stddev"].is_null());
        assert!(json["confidence_lo"].is_null());
        assert!(json["confidence_hi"].is_null());
    }

    #[test]
    fn trial_streams_differ() {
        let a: u64 = trial_rng(5, 0).random();
        let b: u64 = trial_rng(5, 1).random();
        assert_ne!(a, b);
        assert_eq!(a, trial_rng(5, 0).random::<u64>());
    }

    #[test]
    fn summary_mirrors_accessors() {
        let cfg = ExperimentConfig::new(8, 12).with_seed(21);
        let stats = PercolationStats::with_config(&cfg).unwrap();
        let summary = stats.summary();

        assert_eq!(summary.grid_size, 8);
        assert_eq!(summary.trials, 12);
        assert_eq!(summary.seed, 21);
        assert_eq!(summary.mean, stats.mean());
        assert_eq!(summary.confidence_hi, stats.confidence_hi());
        assert_eq!(summary.fractions, stats.fractions());
        assert_eq!(stats.trials().len(), 12);
        for (k, trial) in stats.trials().iter().enumerate() {
            assert_eq!(trial.trial, k);
        }
    }
}
