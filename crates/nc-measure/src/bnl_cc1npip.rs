//! BNL 7ft bubble-chamber measurement: nu_mu CC single-pi+ production on
//! neutrons, cross section versus neutrino energy.

use nc_core::{FitEvent, Result};

use crate::data::{DataSet, load_data_table};
use crate::measurement::Measurement;
use crate::signal::is_cc1pi_3prong;

const DATA_CORRECTED: &str = include_str!("../data/bnl/BNL_CC1pip_on_n_1986_corr.txt");
const DATA_PUBLISHED: &str = include_str!("../data/bnl/BNL_CC1pip_on_n_1986.txt");

const ENU_MIN_MEV: f64 = 0.0;
const ENU_MAX_MEV: f64 = 3000.0;

/// `sigma(E_nu)` for CC 1pi+ on neutron from the BNL deuterium exposure.
///
/// The selection asks for exactly mu-, pi+, n in the final state with the
/// neutrino energy below 3 GeV. No W cut is applied. Normalization error
/// is 15%, treated as a diagonal contribution only.
pub struct BnlCc1npipXSec1DEnu {
    name: &'static str,
    data: DataSet,
}

impl BnlCc1npipXSec1DEnu {
    /// Build against the corrected (default) or as-published dataset.
    pub fn new(use_corrected: bool) -> Result<Self> {
        let (name, table) = if use_corrected {
            ("BNL_CC1npip_XSec_1DEnu_nu", DATA_CORRECTED)
        } else {
            ("BNL_CC1npip_XSec_1DEnu_nu_UNCORR", DATA_PUBLISHED)
        };
        Ok(Self { name, data: load_data_table(table, name)? })
    }
}

impl Measurement for BnlCc1npipXSec1DEnu {
    fn name(&self) -> &str {
        self.name
    }

    fn data(&self) -> &DataSet {
        &self.data
    }

    fn is_signal(&self, event: &FitEvent) -> bool {
        is_cc1pi_3prong(event, 14, 211, 2112, ENU_MIN_MEV, ENU_MAX_MEV)
    }

    fn project(&self, event: &FitEvent) -> f64 {
        // E_nu in GeV; momenta are carried in MeV.
        event.neutrino_in().map(|nu| nu.e() / 1000.0).unwrap_or(-1.0)
    }

    fn target_scale(&self) -> f64 {
        // Free-nucleon correction carried over from the published analysis.
        16.0 / 8.0
    }
}
