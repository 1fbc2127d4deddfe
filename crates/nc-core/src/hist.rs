//! Minimal 1D histogram used for event-rate normalization and measurement
//! spectra.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 1D histogram with explicit bin edges.
///
/// Entries outside the axis are recorded in `underflow`/`overflow` and do
/// not enter the bin contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hist1D {
    /// Histogram name.
    pub name: String,
    /// Bin edges (length = n_bins + 1, strictly increasing).
    pub bin_edges: Vec<f64>,
    /// Bin contents (sum of weights per bin).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Sum of weights below the first edge.
    pub underflow: f64,
    /// Sum of weights at or above the last edge.
    pub overflow: f64,
    /// Total fill calls.
    pub entries: u64,
}

impl Hist1D {
    /// Create a histogram with `n_bins` uniform bins over `[x_min, x_max)`.
    pub fn new(name: impl Into<String>, n_bins: usize, x_min: f64, x_max: f64) -> Self {
        let width = (x_max - x_min) / n_bins as f64;
        let bin_edges = (0..=n_bins).map(|i| x_min + width * i as f64).collect();
        Self::with_edges(name, bin_edges).expect("uniform edges are monotonic")
    }

    /// Create a histogram from explicit edges.
    pub fn with_edges(name: impl Into<String>, bin_edges: Vec<f64>) -> Result<Self> {
        if bin_edges.len() < 2 {
            return Err(Error::Validation("histogram needs at least one bin".into()));
        }
        if bin_edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::Validation("histogram edges must be strictly increasing".into()));
        }
        let n_bins = bin_edges.len() - 1;
        Ok(Self {
            name: name.into(),
            bin_edges,
            bin_content: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        })
    }

    /// Number of bins (excluding under/overflow).
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Bin index for `x`, or `None` if outside the axis.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if x < self.bin_edges[0] || x >= self.bin_edges[self.n_bins()] {
            return None;
        }
        // partition_point: first edge > x, minus one.
        let idx = self.bin_edges.partition_point(|&e| e <= x);
        Some(idx - 1)
    }

    /// Fill with unit weight.
    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    /// Fill with weight `w`.
    pub fn fill_weighted(&mut self, x: f64, w: f64) {
        self.entries += 1;
        match self.find_bin(x) {
            Some(i) => {
                self.bin_content[i] += w;
                self.sumw2[i] += w * w;
            }
            None if x < self.bin_edges[0] => self.underflow += w,
            None => self.overflow += w,
        }
    }

    /// Overwrite one bin's content.
    pub fn set_bin_content(&mut self, bin: usize, value: f64) {
        self.bin_content[bin] = value;
    }

    /// Content of one bin.
    pub fn bin_content(&self, bin: usize) -> f64 {
        self.bin_content[bin]
    }

    /// Center of one bin.
    pub fn bin_center(&self, bin: usize) -> f64 {
        0.5 * (self.bin_edges[bin] + self.bin_edges[bin + 1])
    }

    /// Width of one bin.
    pub fn bin_width(&self, bin: usize) -> f64 {
        self.bin_edges[bin + 1] - self.bin_edges[bin]
    }

    /// Sum of bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Sum of bin content times bin width.
    pub fn integral_width(&self) -> f64 {
        self.bin_content
            .iter()
            .enumerate()
            .map(|(i, c)| c * self.bin_width(i))
            .sum()
    }

    /// Multiply all contents (and errors) by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for c in &mut self.bin_content {
            *c *= factor;
        }
        for s in &mut self.sumw2 {
            *s *= factor * factor;
        }
        self.underflow *= factor;
        self.overflow *= factor;
    }

    /// Reset contents to zero, keeping the binning.
    pub fn reset(&mut self) {
        self.bin_content.iter_mut().for_each(|c| *c = 0.0);
        self.sumw2.iter_mut().for_each(|s| *s = 0.0);
        self.underflow = 0.0;
        self.overflow = 0.0;
        self.entries = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_flows() {
        let mut h = Hist1D::new("h", 10, 0.0, 10.0);
        h.fill(0.5);
        h.fill_weighted(5.5, 2.0);
        h.fill(-1.0);
        h.fill(10.0);
        assert_eq!(h.bin_content(0), 1.0);
        assert_eq!(h.bin_content(5), 2.0);
        assert_eq!(h.underflow, 1.0);
        assert_eq!(h.overflow, 1.0);
        assert_eq!(h.entries, 4);
        assert!((h.integral() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_bin_lookup_roundtrip() {
        // The event-rate placeholder: one scalar dropped into a 10-bin axis.
        let mut h = Hist1D::new("eventhist", 10, 0.0, 10.0);
        h.set_bin_content(5, 1.234);
        assert!((h.integral() - 1.234).abs() < 1e-12);
        assert!((h.integral_width() - 1.234).abs() < 1e-12);
    }

    #[test]
    fn variable_edges() {
        let h = Hist1D::with_edges("v", vec![0.0, 1.0, 3.0, 7.0]).unwrap();
        assert_eq!(h.find_bin(2.0), Some(1));
        assert_eq!(h.find_bin(6.999), Some(2));
        assert_eq!(h.find_bin(7.0), None);
        assert!((h.bin_width(2) - 4.0).abs() < 1e-12);
        assert!(Hist1D::with_edges("bad", vec![1.0, 1.0]).is_err());
    }
}
