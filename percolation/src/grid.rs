//! N-by-N site percolation grid.
//!
//! Sites are addressed with 1-based `(row, col)` coordinates and stored
//! row-major in a flat array. Connectivity is tracked with a petgraph
//! [`UnionFind`] over `N*N + 2` elements: every site plus a virtual top
//! sentinel (`N*N`) joined to each open site of row 1 and a virtual bottom
//! sentinel (`N*N + 1`) joined to each open site of row N. The grid
//! percolates exactly when the two sentinels share a class.

use petgraph::unionfind::UnionFind;
use tracing::trace;

use crate::error::{ensure_nonzero, Axis, PercolationError, Result};

#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
    uf: UnionFind<usize>,
    /// `union` calls that merged two distinct classes.
    merges: usize,
    virtual_top: usize,
    virtual_bottom: usize,
}

impl Percolation {
    /// Creates an `n`-by-`n` grid with every site blocked.
    ///
    /// Fails when `n` is zero or when `n*n + 2` overflows `usize`.
    pub fn new(n: usize) -> Result<Self> {
        let n = ensure_nonzero("n", n)?;
        let elements = n
            .checked_mul(n)
            .and_then(|sites| sites.checked_add(2))
            .ok_or(PercolationError::InvalidArgument {
                name: "n",
                value: i64::try_from(n).unwrap_or(i64::MAX),
                reason: "is too large for the grid index space",
            })?;
        let sites = elements - 2;
        Ok(Self {
            n,
            open: vec![false; sites],
            open_count: 0,
            uf: UnionFind::new(elements),
            merges: 0,
            virtual_top: sites,
            virtual_bottom: sites + 1,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Maps a 1-based coordinate to its flat index. All bounds checks live here.
    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < 1 || row > self.n {
            return Err(PercolationError::OutOfRange {
                axis: Axis::Row,
                index: row,
                size: self.n,
            });
        }
        if col < 1 || col > self.n {
            return Err(PercolationError::OutOfRange {
                axis: Axis::Column,
                index: col,
                size: self.n,
            });
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    fn join(&mut self, p: usize, q: usize) {
        if self.uf.union(p, q) {
            self.merges += 1;
        }
    }

    fn connected(&mut self, p: usize, q: usize) -> bool {
        self.uf.find_mut(p) == self.uf.find_mut(q)
    }

    /// Opens site `(row, col)` and joins it to its open neighbours.
    /// Opening an already open site has no effect.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.index(row, col)?;
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;
        trace!(row, col, "site opened");

        let n = self.n;
        let neighbours = [
            (row > 1).then(|| site - n),
            (row < n).then(|| site + n),
            (col > 1).then(|| site - 1),
            (col < n).then(|| site + 1),
        ];
        for neighbour in neighbours.into_iter().flatten() {
            if self.open[neighbour] {
                self.join(site, neighbour);
            }
        }

        // A single-row grid joins both sentinels through the same site
        if row == 1 {
            self.join(site, self.virtual_top);
        }
        if row == n {
            self.join(site, self.virtual_bottom);
        }
        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.index(row, col)?;
        Ok(self.open[site])
    }

    /// Whether site `(row, col)` is open and connected to the top row.
    ///
    /// Takes `&mut self` because `find_mut` compresses paths.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.index(row, col)?;
        Ok(self.open[site] && self.connected(site, self.virtual_top))
    }

    /// Whether an open path joins the top row to the bottom row.
    pub fn percolates(&mut self) -> bool {
        self.connected(self.virtual_top, self.virtual_bottom)
    }
}
