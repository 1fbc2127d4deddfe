//! Measurement engine: drive an input handler over all entries, select and
//! project signal events, scale into cross-section units, and compare.

use serde::Serialize;

use nc_core::{Error, FitEvent, Hist1D, InputHandler, Result};

use crate::bnl_cc1npip::BnlCc1npipXSec1DEnu;
use crate::data::{DataSet, invert_covariance};
use crate::stats::{chi2_pvalue, chi2_with_inverse};

/// One published measurement: data, signal definition, and projection.
pub trait Measurement {
    /// Measurement name, as used in configuration and reports.
    fn name(&self) -> &str;

    /// The published dataset with its errors.
    fn data(&self) -> &DataSet;

    /// Whether a reconstructed event enters the signal selection.
    fn is_signal(&self, event: &FitEvent) -> bool;

    /// Kinematic projection of a signal event onto the data axis.
    fn project(&self, event: &FitEvent) -> f64;

    /// Target correction applied on top of the per-event normalization
    /// (e.g. a per-nucleon factor). Defaults to no correction.
    fn target_scale(&self) -> f64 {
        1.0
    }
}

/// Outcome of comparing generator predictions against one measurement.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// Measurement name.
    pub name: String,
    /// Events read from the input.
    pub n_events: u64,
    /// Events passing the signal selection.
    pub n_signal: u64,
    /// Events-to-cross-section scale factor applied to the MC spectrum.
    pub scale_factor: f64,
    /// Chi-square of the scaled MC against the data.
    pub chi2: f64,
    /// Degrees of freedom (number of data bins).
    pub ndof: usize,
    /// Chi-square survival probability.
    pub p_value: f64,
    /// The published data spectrum.
    pub data: Hist1D,
    /// The scaled MC spectrum.
    pub mc: Hist1D,
}

/// Instantiate a measurement by name.
pub fn from_name(name: &str) -> Result<Box<dyn Measurement>> {
    match name {
        "BNL_CC1npip_XSec_1DEnu_nu" => Ok(Box::new(BnlCc1npipXSec1DEnu::new(true)?)),
        "BNL_CC1npip_XSec_1DEnu_nu_UNCORR" => Ok(Box::new(BnlCc1npipXSec1DEnu::new(false)?)),
        _ => Err(Error::Config(format!("unknown measurement '{name}'"))),
    }
}

/// Run one measurement over every event the handler serves.
pub fn run_comparison(
    measurement: &dyn Measurement,
    handler: &mut dyn InputHandler,
) -> Result<ComparisonResult> {
    let dataset = measurement.data();
    let mut mc = Hist1D::with_edges(
        format!("{}_MC", measurement.name()),
        dataset.hist.bin_edges.clone(),
    )?;

    let n_events = handler.n_events();
    if n_events == 0 {
        return Err(Error::Input(format!(
            "no events available for measurement '{}'",
            measurement.name()
        )));
    }

    let mut n_signal = 0u64;
    for entry in 0..n_events {
        let event = match handler.event(entry)? {
            Some(ev) => ev,
            None => break,
        };
        if !measurement.is_signal(event) {
            continue;
        }
        let x = measurement.project(event);
        let w = event.input_weight;
        mc.fill_weighted(x, w);
        n_signal += 1;
    }
    log::info!(
        "'{}': {n_signal} of {n_events} events pass the signal selection",
        measurement.name()
    );

    // Width integral of the event-rate placeholder is the flux-averaged
    // cross section in 10⁻³⁸ cm²; the spectrum comes out in cm² per bin.
    let scale_factor = handler.event_rate().integral_width() * 1e-38 / n_events as f64
        * measurement.target_scale();
    mc.scale(scale_factor);

    let covar_inv = invert_covariance(&dataset.diagonal_covariance())?;
    let chi2 = chi2_with_inverse(&dataset.hist, &mc, &covar_inv)?;
    let ndof = dataset.hist.n_bins();
    let p_value = chi2_pvalue(chi2, ndof)?;

    Ok(ComparisonResult {
        name: measurement.name().to_string(),
        n_events,
        n_signal,
        scale_factor,
        chi2,
        ndof,
        p_value,
        data: dataset.hist.clone(),
        mc,
    })
}
