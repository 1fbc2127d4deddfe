//! Published-dataset loading: text tables into histograms and covariance
//! matrices.

use nalgebra::DMatrix;
use nc_core::{Error, Hist1D, Result};

/// A published dataset: binned values plus per-bin errors.
#[derive(Debug, Clone)]
pub struct DataSet {
    /// The measured spectrum.
    pub hist: Hist1D,
    /// Per-bin absolute errors, same length as the bin contents.
    pub errors: Vec<f64>,
}

impl DataSet {
    /// Diagonal covariance built from the per-bin errors.
    pub fn diagonal_covariance(&self) -> DMatrix<f64> {
        let n = self.errors.len();
        DMatrix::from_fn(n, n, |i, j| if i == j { self.errors[i] * self.errors[i] } else { 0.0 })
    }
}

/// Parse a whitespace data table: `x y [err]` rows, `#` comments.
///
/// The x column holds bin centers; edges are reconstructed midway between
/// neighboring centers, with the outer edges mirrored symmetrically.
pub fn load_data_table(text: &str, name: impl Into<String>) -> Result<DataSet> {
    let mut centers = Vec::new();
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<f64> = line
            .split_whitespace()
            .map(|t| {
                t.parse().map_err(|_| {
                    Error::Validation(format!("data table line {}: bad number '{t}'", i + 1))
                })
            })
            .collect::<Result<_>>()?;
        if cols.len() < 2 {
            return Err(Error::Validation(format!(
                "data table line {}: expected 'x y [err]'",
                i + 1
            )));
        }
        centers.push(cols[0]);
        values.push(cols[1]);
        errors.push(cols.get(2).copied().unwrap_or(0.0));
    }

    if centers.len() < 2 {
        return Err(Error::Validation("data table needs at least two rows".into()));
    }
    if centers.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::Validation("data table x column must be increasing".into()));
    }

    let mut hist = Hist1D::with_edges(name, edges_from_centers(&centers))?;
    for (bin, v) in values.iter().enumerate() {
        hist.set_bin_content(bin, *v);
    }
    Ok(DataSet { hist, errors })
}

/// Invert a covariance matrix; a singular matrix is a computation error.
pub fn invert_covariance(covar: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    covar
        .clone()
        .try_inverse()
        .ok_or_else(|| Error::Computation("covariance matrix is singular".into()))
}

fn edges_from_centers(centers: &[f64]) -> Vec<f64> {
    let n = centers.len();
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(centers[0] - 0.5 * (centers[1] - centers[0]));
    for w in centers.windows(2) {
        edges.push(0.5 * (w[0] + w[1]));
    }
    edges.push(centers[n - 1] + 0.5 * (centers[n - 1] - centers[n - 2]));
    edges
}
