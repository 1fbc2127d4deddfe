//! Joint-input index table: several files treated as one logical event
//! stream, each contributing a relative scale weight.

use nc_core::{Error, Result};

/// Partition of the global event-index space across sub-files.
///
/// Built once at open time from per-file event counts; the lookup cursor
/// rotates from the last match because global indices arrive in increasing
/// order in the common case. The cursor is single-owner internal state and
/// is never shared across instances.
#[derive(Debug, Clone)]
pub struct JointIndexTable {
    lows: Vec<u64>,
    highs: Vec<u64>,
    scales: Vec<f64>,
    combined_fatx: f64,
    cursor: usize,
}

impl JointIndexTable {
    /// Build from per-file `(event count, fatx)` pairs.
    ///
    /// The combined cross section is the event-count-weighted mean of the
    /// per-file values; each sub-file's scale re-weights its events to its
    /// own cross section: `(fatx_i / fatx_combined) × (n_total / n_i)`.
    pub fn build(files: &[(u64, f64)]) -> Result<Self> {
        if files.is_empty() {
            return Err(Error::Config("joint index table built from no inputs".into()));
        }
        if files.iter().any(|&(n, _)| n == 0) {
            return Err(Error::Config("joint input with zero events".into()));
        }

        let n_total: u64 = files.iter().map(|&(n, _)| n).sum();
        let combined_fatx =
            files.iter().map(|&(n, fatx)| fatx * n as f64).sum::<f64>() / n_total as f64;

        let mut lows = Vec::with_capacity(files.len());
        let mut highs = Vec::with_capacity(files.len());
        let mut scales = Vec::with_capacity(files.len());
        let mut edge = 0u64;
        for &(n, fatx) in files {
            lows.push(edge);
            edge += n;
            highs.push(edge);
            scales.push((fatx / combined_fatx) * (n_total as f64 / n as f64));
        }

        Ok(Self { lows, highs, scales, combined_fatx, cursor: 0 })
    }

    /// Number of sub-files.
    pub fn n_files(&self) -> usize {
        self.lows.len()
    }

    /// Total number of events across all sub-files.
    pub fn n_total(&self) -> u64 {
        *self.highs.last().expect("table is never empty")
    }

    /// Event-count-weighted mean cross section.
    pub fn combined_fatx(&self) -> f64 {
        self.combined_fatx
    }

    /// Scale weight of one sub-file.
    pub fn scale(&self, file: usize) -> f64 {
        self.scales[file]
    }

    /// Sub-file containing `global`, walking the rotating cursor.
    fn find(&mut self, global: u64) -> Result<usize> {
        let start = self.cursor;
        while global < self.lows[self.cursor] || global >= self.highs[self.cursor] {
            self.cursor += 1;
            if self.cursor == self.lows.len() {
                self.cursor = 0;
            }
            if self.cursor == start {
                // The ranges partition the full space, so a full rotation
                // means the index is outside it entirely.
                return Err(Error::Config(format!(
                    "event index {global} outside joint input range 0..{}",
                    self.n_total()
                )));
            }
        }
        Ok(self.cursor)
    }

    /// Scale weight for the sub-file containing `global`.
    pub fn resolve_weight(&mut self, global: u64) -> Result<f64> {
        let file = self.find(global)?;
        Ok(self.scales[file])
    }

    /// Map a global index to `(sub-file, local index)`.
    pub fn locate(&mut self, global: u64) -> Result<(usize, u64)> {
        let file = self.find(global)?;
        Ok((file, global - self.lows[file]))
    }
}
