//! Chi-square comparison statistics.

use nalgebra::{DMatrix, DVector};
use nc_core::{Error, Hist1D, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Chi-square of `mc` against `data` through an inverted covariance:
/// `(d - m)ᵀ C⁻¹ (d - m)`.
pub fn chi2_with_inverse(data: &Hist1D, mc: &Hist1D, covar_inv: &DMatrix<f64>) -> Result<f64> {
    let n = data.n_bins();
    if mc.n_bins() != n || covar_inv.nrows() != n || covar_inv.ncols() != n {
        return Err(Error::Validation(format!(
            "chi2 dimension mismatch: data {n}, mc {}, covariance {}x{}",
            mc.n_bins(),
            covar_inv.nrows(),
            covar_inv.ncols()
        )));
    }
    let diff = DVector::from_fn(n, |i, _| data.bin_content(i) - mc.bin_content(i));
    Ok((diff.transpose() * covar_inv * diff)[(0, 0)])
}

/// Survival probability of `chi2` for `ndof` degrees of freedom.
pub fn chi2_pvalue(chi2: f64, ndof: usize) -> Result<f64> {
    if ndof == 0 {
        return Err(Error::Computation("p-value with zero degrees of freedom".into()));
    }
    let dist = ChiSquared::new(ndof as f64)
        .map_err(|e| Error::Computation(format!("chi-squared distribution: {e}")))?;
    Ok(1.0 - dist.cdf(chi2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hist(contents: &[f64]) -> Hist1D {
        let mut h = Hist1D::new("h", contents.len(), 0.0, contents.len() as f64);
        for (i, c) in contents.iter().enumerate() {
            h.set_bin_content(i, *c);
        }
        h
    }

    #[test]
    fn chi2_against_hand_computed_value() {
        let data = hist(&[1.0, 2.0, 3.0]);
        let mc = hist(&[1.5, 1.5, 3.5]);
        // Unit covariance: chi2 = 0.25 + 0.25 + 0.25
        let inv = DMatrix::identity(3, 3);
        let chi2 = chi2_with_inverse(&data, &mc, &inv).unwrap();
        assert_relative_eq!(chi2, 0.75, max_relative = 1e-12);
    }

    #[test]
    fn chi2_weights_by_inverse_variance() {
        let data = hist(&[1.0, 1.0]);
        let mc = hist(&[2.0, 2.0]);
        let mut inv = DMatrix::zeros(2, 2);
        inv[(0, 0)] = 4.0; // sigma = 0.5
        inv[(1, 1)] = 1.0; // sigma = 1.0
        let chi2 = chi2_with_inverse(&data, &mc, &inv).unwrap();
        assert_relative_eq!(chi2, 5.0, max_relative = 1e-12);
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let data = hist(&[1.0, 2.0]);
        let mc = hist(&[1.0, 2.0, 3.0]);
        let inv = DMatrix::identity(2, 2);
        assert!(chi2_with_inverse(&data, &mc, &inv).is_err());
    }

    #[test]
    fn pvalue_known_points() {
        // chi2 = ndof sits near the distribution bulk.
        let p = chi2_pvalue(1.0, 1).unwrap();
        assert_relative_eq!(p, 0.3173, max_relative = 1e-3);
        let p = chi2_pvalue(0.0, 5).unwrap();
        assert_relative_eq!(p, 1.0, max_relative = 1e-12);
        assert!(chi2_pvalue(1.0, 0).is_err());
    }
}
