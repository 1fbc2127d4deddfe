//! # nc-measure
//!
//! Measurement modules: published cross-section datasets, signal
//! definitions, histogram comparison, and chi-square statistics.
//!
//! A measurement owns a published data histogram with its covariance,
//! selects signal events from an input handler, projects them onto one
//! kinematic variable, and scales the accumulated spectrum into
//! cross-section units for comparison.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bnl_cc1npip;
pub mod data;
pub mod measurement;
pub mod signal;
pub mod stats;

pub use bnl_cc1npip::BnlCc1npipXSec1DEnu;
pub use data::DataSet;
pub use measurement::{ComparisonResult, Measurement, from_name, run_comparison};
