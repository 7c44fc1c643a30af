//! Run configuration for a percolation threshold estimate.
//!
//! [`ExperimentConfig`] can be built in code, loaded from a JSON file, or
//! assembled by the `percolation-stats` binary from stdin and flags.
//!
//! ```rust
//! use percolation::config::ExperimentConfig;
//!
//! let cfg = ExperimentConfig::new(20, 200).with_seed(7);
//! cfg.validate().expect("positive sizes are valid");
//! assert!(!cfg.parallel);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_nonzero, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Side length N of the grid.
    pub grid_size: usize,
    /// Number of independent trials T.
    pub trials: usize,
    /// Master seed. `None` draws one from the OS-seeded thread generator.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl ExperimentConfig {
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            seed: None,
            parallel: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that both the grid size and the trial count are positive.
    pub fn validate(&self) -> Result<()> {
        ensure_nonzero("n", self.grid_size)?;
        ensure_nonzero("trials", self.trials)?;
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
