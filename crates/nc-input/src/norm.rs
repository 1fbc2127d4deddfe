//! Normalization resolution: convention detection and the one-shot pre-scan
//! pass that turns a file of events into a single events-to-cross-section
//! conversion factor.

use nc_core::{Error, Result};
use nc_hepmc::{AsciiReader, RunInfo};

/// Precomputed flux-averaged total cross section is present.
const CONV_FATX: &str = "G.C.4";
/// Per-event running cross-section estimates are present.
const CONV_RUNNING_ESTIMATE: &str = "E.C.4";
/// Cross sections are stored in 10⁻⁴⁰ cm² and need a factor 100.
const CONV_ALT_UNITS: &str = "E.C.5";

const ATTR_CONVENTIONS: &str = "NuHepMC.Conventions";
const ATTR_FATX: &str = "NuHepMC.FluxAveragedTotalCrossSection";

/// The closed set of NuHepMC conventions this pipeline acts on, resolved
/// once per file so serving never re-scans attribute strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConventionFlags {
    /// `G.C.4`: run info carries a precomputed flux-averaged cross section.
    pub precomputed_fatx: bool,
    /// `E.C.4`: events carry a running cross-section estimate.
    pub running_estimate: bool,
    /// `E.C.5`: alternate units, conversion factor 100 into 10⁻³⁸ cm².
    pub alt_units: bool,
}

impl ConventionFlags {
    /// Resolve the flags from a run-info record.
    ///
    /// The conventions attribute is required; its absence makes the file
    /// unusable and fails with the full attribute listing.
    pub fn from_run_info(run: &RunInfo) -> Result<Self> {
        let conventions = run
            .checked_vector_string_attribute(ATTR_CONVENTIONS)
            .map_err(|e| Error::Input(e.to_string()))?;
        let mut flags = Self::default();
        for c in &conventions {
            match c.as_str() {
                CONV_FATX => flags.precomputed_fatx = true,
                CONV_RUNNING_ESTIMATE => flags.running_estimate = true,
                CONV_ALT_UNITS => flags.alt_units = true,
                _ => {}
            }
        }
        Ok(flags)
    }

    /// Conversion factor into the framework's 10⁻³⁸ cm² units.
    pub fn units_factor(&self) -> f64 {
        if self.alt_units { 1e2 } else { 1.0 }
    }
}

/// Typed run-level metadata captured during the pre-scan.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    /// Resolved convention flags.
    pub flags: ConventionFlags,
    /// Declared weight-channel names, in file order.
    pub weight_names: Vec<String>,
    /// Precomputed flux-averaged cross section, when `G.C.4` is declared.
    pub precomputed_fatx: Option<f64>,
}

/// Result of one pre-scan pass over a file.
#[derive(Debug, Clone)]
pub struct Prescan {
    /// Number of decodable events in the file.
    pub n_events: u64,
    /// Run metadata captured on the first decoded event.
    pub metadata: RunMetadata,
    /// Last per-event cross-section estimate seen (running convention).
    pub best_estimate: Option<f64>,
    /// Sum of the first weight channel over all events.
    ///
    /// Diagnostic only: logged at scan end, never used in the
    /// normalization formula.
    pub sum_of_weights: f64,
}

/// Scan the entire file once, decoding every event to completion.
///
/// Counts events, captures run metadata on the first decoded event, and
/// under the running-estimate convention tracks the LAST per-event
/// cross-section value (overwrite, not sum) plus the first-channel weight
/// sum. A file with zero decodable events is unusable and fails fatally.
///
/// The pass consumes the reader's cursor entirely; callers reopen for
/// serving.
pub fn prescan(reader: &mut AsciiReader) -> Result<Prescan> {
    let path = reader.path().to_path_buf();
    let mut n_events: u64 = 0;
    let mut metadata: Option<RunMetadata> = None;
    let mut best_estimate: Option<f64> = None;
    let mut sum_of_weights = 0.0;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::Input(format!("{}: {}", path.display(), e)))?;
        let event = match event {
            Some(ev) => ev,
            None => break,
        };
        n_events += 1;

        if metadata.is_none() {
            if let Some(run) = reader.run_info() {
                let flags = ConventionFlags::from_run_info(run)?;
                let precomputed_fatx = if flags.precomputed_fatx {
                    Some(
                        run.checked_attribute_f64(ATTR_FATX)
                            .map_err(|e| Error::Input(format!("{}: {}", path.display(), e)))?,
                    )
                } else {
                    None
                };
                log::debug!(
                    "{}: weight channels {:?}, conventions {:?}",
                    path.display(),
                    run.weight_names,
                    flags
                );
                metadata = Some(RunMetadata {
                    flags,
                    weight_names: run.weight_names.clone(),
                    precomputed_fatx,
                });
            }
        }

        let running = metadata.as_ref().map(|m| m.flags.running_estimate).unwrap_or(false);
        if running {
            let has_weights =
                metadata.as_ref().map(|m| !m.weight_names.is_empty()).unwrap_or(false);
            match &event.cross_section {
                Some(xs) if has_weights => {
                    best_estimate = Some(xs.value());
                    sum_of_weights += event.weights.first().copied().unwrap_or(0.0);
                }
                Some(_) => {}
                None => {
                    log::warn!(
                        "{}: failed to read cross-section info for event {}",
                        path.display(),
                        n_events - 1
                    );
                }
            }
        }
    }

    let metadata = metadata.ok_or_else(|| {
        Error::Config(format!(
            "could not read run info from {}: no decodable events",
            path.display()
        ))
    })?;

    log::info!(
        "{}: pre-scan found {} events (sum of weights {}, last running estimate {:?})",
        path.display(),
        n_events,
        sum_of_weights,
        best_estimate
    );

    Ok(Prescan { n_events, metadata, best_estimate, sum_of_weights })
}

/// Resolve the flux-averaged total cross section, in 10⁻³⁸ cm².
///
/// Precedence: precomputed value, then the last running estimate, then 1.0
/// when neither convention is declared (consumption of un-normalized data
/// is allowed but not meaningful).
pub fn resolve_fatx(scan: &Prescan) -> f64 {
    let flags = &scan.metadata.flags;
    if flags.precomputed_fatx {
        // Present by construction: the pre-scan demands the attribute when
        // the convention is declared.
        scan.metadata.precomputed_fatx.unwrap_or_default() * flags.units_factor()
    } else if flags.running_estimate {
        scan.best_estimate.unwrap_or(0.0) * flags.units_factor()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_info_with(conventions: &str) -> RunInfo {
        let mut ri = RunInfo::default();
        ri.attributes.insert(ATTR_CONVENTIONS.into(), conventions.into());
        ri
    }

    #[test]
    fn flags_resolve_once() {
        let flags = ConventionFlags::from_run_info(&run_info_with("G.C.1 G.C.4 E.C.5")).unwrap();
        assert!(flags.precomputed_fatx);
        assert!(!flags.running_estimate);
        assert!(flags.alt_units);
        assert_eq!(flags.units_factor(), 1e2);
    }

    #[test]
    fn unknown_conventions_are_ignored() {
        let flags = ConventionFlags::from_run_info(&run_info_with("G.C.1 G.C.2")).unwrap();
        assert_eq!(flags, ConventionFlags::default());
    }

    #[test]
    fn missing_conventions_attribute_is_fatal() {
        assert!(ConventionFlags::from_run_info(&RunInfo::default()).is_err());
    }

    #[test]
    fn fatx_precedence() {
        let meta = |flags, precomputed| RunMetadata {
            flags,
            weight_names: vec!["CV".into()],
            precomputed_fatx: precomputed,
        };

        let precomputed = Prescan {
            n_events: 3,
            metadata: meta(
                ConventionFlags { precomputed_fatx: true, running_estimate: true, alt_units: false },
                Some(1.234),
            ),
            best_estimate: Some(9.0),
            sum_of_weights: 3.0,
        };
        assert_eq!(resolve_fatx(&precomputed), 1.234);

        let running = Prescan {
            n_events: 3,
            metadata: meta(
                ConventionFlags { precomputed_fatx: false, running_estimate: true, alt_units: false },
                None,
            ),
            best_estimate: Some(0.7),
            sum_of_weights: 3.0,
        };
        assert_eq!(resolve_fatx(&running), 0.7);

        let bare = Prescan {
            n_events: 3,
            metadata: meta(ConventionFlags::default(), None),
            best_estimate: None,
            sum_of_weights: 0.0,
        };
        assert_eq!(resolve_fatx(&bare), 1.0);
    }
}
