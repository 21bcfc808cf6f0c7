use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn reference_case() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../jgrad-pipeline/fixtures/reference_f0p3_p8.json")
}

fn jgrad_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jgrad-sim"))
        .args(args)
        .env("JGRAD_LOG", "off")
        .output()
        .expect("run jgrad-sim")
}

fn stdout_json(output: &Output) -> Value {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let body = String::from_utf8(output.stdout.clone()).expect("utf8");
    serde_json::from_str(&body).expect("json")
}

fn write_batch_record(dir: &tempfile::TempDir) -> PathBuf {
    let case: Value = serde_json::from_str(&fs::read_to_string(reference_case()).unwrap()).unwrap();
    let path = dir.path().join("batch.json");
    fs::write(&path, serde_json::to_string(&case["record"]).unwrap()).unwrap();
    path
}

#[test]
fn encode_reports_fraction_text() {
    let value = stdout_json(&jgrad_sim(&["encode", "--value", "-0.3125", "--precision", "4"]));
    assert_eq!(value["fraction"], "-0.0101");
    assert_eq!(value["decoded"], -0.3125);
    assert_eq!(value["negative"], true);
    assert_eq!(value["literal"], -0.0101);
}

#[test]
fn encode_rejects_out_of_domain_value() {
    let output = jgrad_sim(&["encode", "--value", "1.5"]);
    assert!(!output.status.success());
}

#[test]
fn decode_accepts_text_and_value() {
    let text = stdout_json(&jgrad_sim(&["decode", "--text", "0.1101"]));
    assert_eq!(text["decoded"], 0.8125);
    let value = stdout_json(&jgrad_sim(&["decode", "--value", "0.0101", "--digits", "4"]));
    assert_eq!(value["decoded"], 0.3125);
}

#[test]
fn aggregate_and_estimate_agree_on_recorded_batch() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch_record(&dir);
    let batch_arg = batch.to_str().unwrap();

    let summary = stdout_json(&jgrad_sim(&["aggregate", "--batch", batch_arg]));
    assert_eq!(summary["fraction"], "0.01001100");
    assert_eq!(summary["rows"], 50);

    let config = dir.path().join("estimate.yaml");
    fs::write(&config, "precision: 8\nsample_count: 50\n").unwrap();
    let trace_out = dir.path().join("trace.json");
    let estimate = stdout_json(&jgrad_sim(&[
        "estimate",
        "--f-h",
        "-0.3",
        "--batch",
        batch_arg,
        "--config",
        config.to_str().unwrap(),
        "--trace-out",
        trace_out.to_str().unwrap(),
    ]));
    assert_eq!(estimate["fraction"], "-0.01001100");
    assert_eq!(estimate["estimate"], -0.296875);

    let trace: Value = serde_json::from_str(&fs::read_to_string(trace_out).unwrap()).unwrap();
    assert_eq!(trace["negative"], true);
    assert_eq!(trace["majority"].as_array().map(Vec::len), Some(9));
}

#[test]
fn estimate_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch_record(&dir);
    let output = jgrad_sim(&[
        "estimate",
        "--f-h",
        "0.3",
        "--batch",
        batch.to_str().unwrap(),
        "--precision",
        "8",
        "--samples",
        "51",
    ]);
    assert!(!output.status.success(), "replay holds only 50 rows");
}

#[test]
fn verify_reproduces_reference_case() {
    let report = stdout_json(&jgrad_sim(&["verify", "--case", reference_case().to_str().unwrap()]));
    assert_eq!(report["reproduced"], true);
    assert_eq!(report["estimate"], 0.296875);
}

#[test]
fn program_output_is_canonical_json() {
    let output = jgrad_sim(&["program", "--magnitude", "0.25", "--precision", "3"]);
    let body = String::from_utf8(output.stdout.clone()).unwrap();
    assert!(body.starts_with("{\"program\":"), "{body}");
    let value = stdout_json(&output);
    assert_eq!(value["program"]["ancilla"], 3);
    assert_eq!(value["program_hash"].as_str().map(str::len), Some(64));
}

#[test]
fn version_prints_package_version() {
    let output = jgrad_sim(&["version"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), env!("CARGO_PKG_VERSION"));
}
