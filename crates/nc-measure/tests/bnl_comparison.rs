//! End-to-end: BNL CC1npi+ comparison over a NuHepMC fixture file.

use std::path::PathBuf;

use approx::assert_relative_eq;
use nc_core::InputConfig;
use nc_input::HepmcInputHandler;
use nc_measure::{from_name, run_comparison};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn bnl_comparison_over_fixture_events() {
    let mut handler = HepmcInputHandler::new(
        "bnl",
        &fixture("nuhepmc_fatx.hepmc3"),
        &InputConfig::default(),
    )
    .unwrap();
    let measurement = from_name("BNL_CC1npip_XSec_1DEnu_nu").unwrap();
    let result = run_comparison(measurement.as_ref(), &mut handler).unwrap();

    // Every fixture event is mu- + pi+ + n with a 1 GeV beam neutrino.
    assert_eq!(result.n_events, 5);
    assert_eq!(result.n_signal, 5);

    // scale = fatx * 1e-38 / n_events * (16/8)
    let scale = 1.234 * 1e-38 / 5.0 * 2.0;
    assert_relative_eq!(result.scale_factor, scale, max_relative = 1e-12);

    // All five fills land in the bin containing E_nu = 1.0 GeV.
    let enu_bin = result.data.find_bin(1.0).unwrap();
    assert_relative_eq!(result.mc.bin_content(enu_bin), 5.0 * scale, max_relative = 1e-12);
    for bin in 0..result.mc.n_bins() {
        if bin != enu_bin {
            assert_eq!(result.mc.bin_content(bin), 0.0);
        }
    }

    assert_eq!(result.ndof, 10);
    assert!(result.chi2 > 0.0);
    assert!(result.p_value >= 0.0 && result.p_value <= 1.0);

    // The JSON report round-trips.
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"BNL_CC1npip_XSec_1DEnu_nu\""));
}

#[test]
fn capped_input_changes_per_event_normalization() {
    let mut handler = HepmcInputHandler::new(
        "bnl-capped",
        &fixture("nuhepmc_fatx.hepmc3"),
        &InputConfig::with_max_events(2),
    )
    .unwrap();
    let measurement = from_name("BNL_CC1npip_XSec_1DEnu_nu_UNCORR").unwrap();
    let result = run_comparison(measurement.as_ref(), &mut handler).unwrap();
    assert_eq!(result.n_events, 2);
    assert_relative_eq!(
        result.scale_factor,
        1.234 * 1e-38 / 2.0 * 2.0,
        max_relative = 1e-12
    );
}
