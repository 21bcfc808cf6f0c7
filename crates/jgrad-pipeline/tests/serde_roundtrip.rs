use std::path::PathBuf;

use jgrad_pipeline::trace::{from_json, load, save, to_json};
use jgrad_pipeline::{
    estimate_with_trace, Capabilities, EstimateTrace, KickbackProgram, OracleEncoder,
    PhaseKickbackEncoder, ReferenceCase, ReplayExecutor,
};

fn fixture() -> ReferenceCase {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    load(&base.join("fixtures/reference_f0p3_p8.json")).unwrap()
}

#[test]
fn trace_round_trips_through_disk() {
    let case = fixture();
    let executor = ReplayExecutor::from_record(case.record.clone());
    let capabilities = Capabilities {
        encoder: &PhaseKickbackEncoder,
        executor: &executor,
    };
    let trace = estimate_with_trace(case.f_h, &case.config, capabilities).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    save(&path, &trace).unwrap();
    let restored: EstimateTrace = load(&path).unwrap();
    assert_eq!(restored, trace);
}

#[test]
fn reference_case_round_trips_json() {
    let case = fixture();
    let json = to_json(&case).unwrap();
    let restored: ReferenceCase = from_json(&json).unwrap();
    assert_eq!(restored, case);
}

#[test]
fn program_json_and_hash_are_stable() {
    let program = PhaseKickbackEncoder.build_program(0.3, 8).unwrap();
    let json = to_json(&program).unwrap();
    let restored: KickbackProgram = from_json(&json).unwrap();
    assert_eq!(restored, program);
    assert_eq!(restored.canonical_hash().unwrap(), program.canonical_hash().unwrap());

    let other = PhaseKickbackEncoder.build_program(0.3, 9).unwrap();
    assert_ne!(other.canonical_hash().unwrap(), program.canonical_hash().unwrap());
    assert!(json.contains("\"op\": \"controlled_phase\""));
}

#[test]
fn encoder_rejects_bad_inputs() {
    assert_eq!(
        PhaseKickbackEncoder.build_program(0.3, 0).unwrap_err().code(),
        "zero-precision"
    );
    assert_eq!(
        PhaseKickbackEncoder.build_program(1.0, 4).unwrap_err().code(),
        "magnitude-out-of-domain"
    );
    assert_eq!(
        PhaseKickbackEncoder.build_program(-0.1, 4).unwrap_err().code(),
        "magnitude-out-of-domain"
    );
}
