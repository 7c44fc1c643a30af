//! Error types for the percolation model and its Monte Carlo driver.

use thiserror::Error;

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Which coordinate of a site was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PercolationError {
    /// A size or count outside its accepted range.
    #[error("invalid argument: {name} {reason}, got {value}")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// A 1-based coordinate outside `[1, size]`.
    #[error("{axis} {index} is out of bounds for a {size}x{size} grid")]
    OutOfRange {
        axis: Axis,
        index: usize,
        size: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const NOT_POSITIVE: &str = "must be positive";

/// Converts an externally supplied signed value into a positive size.
pub fn ensure_positive(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(PercolationError::InvalidArgument {
            name,
            value,
            reason: NOT_POSITIVE,
        });
    }
    usize::try_from(value).map_err(|_| PercolationError::InvalidArgument {
        name,
        value,
        reason: "does not fit in a usize",
    })
}

/// Rejects a zero size coming through the typed (`usize`) API.
pub(crate) fn ensure_nonzero(name: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(PercolationError::InvalidArgument {
            name,
            value: 0,
            reason: NOT_POSITIVE,
        });
    }
    Ok(value)
}
