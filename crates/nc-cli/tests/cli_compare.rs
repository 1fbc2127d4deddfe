use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nucomp"))
}

fn repo_root() -> PathBuf {
    // crates/nc-cli -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().unwrap()
}

fn fixture_path(name: &str) -> String {
    repo_root().join("tests/fixtures").join(name).display().to_string()
}

fn tmp_path(filename: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("nucomp_cli_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

#[test]
fn scan_reports_events_and_normalization() {
    let input = fixture_path("nuhepmc_fatx.hepmc3");
    let out = run(&["scan", "--input", &input]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("scan emits JSON");
    assert_eq!(v["n_events"].as_u64(), Some(5));
    assert_eq!(v["normalization"].as_f64(), Some(1.234));
    assert_eq!(v["weight_names"][0].as_str(), Some("CV"));
    assert_eq!(v["files"].as_array().map(Vec::len), Some(1));
}

#[test]
fn compare_writes_result_json_to_file() {
    let input = fixture_path("nuhepmc_fatx.hepmc3");
    let out_path = tmp_path("bnl.json");
    let out = run(&[
        "compare",
        "--input",
        &input,
        "--measurement",
        "BNL_CC1npip_XSec_1DEnu_nu",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(v["name"].as_str(), Some("BNL_CC1npip_XSec_1DEnu_nu"));
    assert_eq!(v["n_events"].as_u64(), Some(5));
    assert_eq!(v["ndof"].as_u64(), Some(10));
    assert!(v["chi2"].as_f64().unwrap().is_finite());
    assert!(v["mc"]["bin_content"].as_array().is_some());

    std::fs::remove_file(&out_path).ok();
}

#[test]
fn events_dump_contains_role_grouped_particles() {
    let input = fixture_path("nuhepmc_fatx.hepmc3");
    let out = run(&["events", "--input", &input, "--entry", "1", "--count", "2"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let dumps = v.as_array().expect("events emits an array");
    assert_eq!(dumps.len(), 2);
    assert_eq!(dumps[0]["event_no"].as_i64(), Some(1));
    assert_eq!(dumps[0]["target_a"].as_i64(), Some(12));
    let pids: Vec<i64> = dumps[0]["particles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pid"].as_i64().unwrap())
        .collect();
    assert_eq!(pids, vec![14, 2112, 13, 211, 1000060120]);
}

#[test]
fn bad_input_fails_with_diagnostic() {
    let input = fixture_path("not_hepmc.txt");
    let out = run(&["scan", "--input", &input]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not a HepMC3 ASCII file"), "stderr: {stderr}");
}
