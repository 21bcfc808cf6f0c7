use jgrad_codec::serde::{to_json, BatchRecord};
use jgrad_codec::MeasurementBatch;
use jgrad_core::{GradError, RunProvenance};
use jgrad_pipeline::{
    estimate, Capabilities, EstimateConfig, Executor, OracleEncoder, PhaseKickbackEncoder,
    Register, ReplayExecutor,
};

fn batch() -> MeasurementBatch {
    MeasurementBatch::from_rows(vec![
        vec![1, 1, 0, 0],
        vec![1, 1, 0, 1],
        vec![0, 1, 0, 0],
    ])
    .unwrap()
}

fn pinned_record(magnitude: f64) -> BatchRecord {
    let program = PhaseKickbackEncoder.build_program(magnitude, 3).unwrap();
    let provenance = RunProvenance {
        backend: "qvm".into(),
        program_hash: program.canonical_hash().unwrap(),
        ..RunProvenance::default()
    };
    BatchRecord::new(batch(), provenance)
}

#[test]
fn replay_serves_leading_rows() {
    let executor = ReplayExecutor::from_batch(batch());
    let program = PhaseKickbackEncoder.build_program(0.1, 3).unwrap();
    let rows = executor.run(&program, &Register::with_ancilla(3), 2).unwrap();
    assert_eq!(rows.rows(), &batch().rows()[..2]);
}

#[test]
fn replay_rejects_oversized_requests() {
    let executor = ReplayExecutor::from_batch(batch());
    let program = PhaseKickbackEncoder.build_program(0.1, 3).unwrap();
    let err = executor
        .run(&program, &Register::with_ancilla(3), 4)
        .unwrap_err();
    assert!(matches!(err, GradError::Backend(ref info) if info.code == "insufficient-samples"));
}

#[test]
fn replay_rejects_mismatched_register() {
    let executor = ReplayExecutor::from_batch(batch());
    let program = PhaseKickbackEncoder.build_program(0.1, 5).unwrap();
    let err = executor
        .run(&program, &Register::with_ancilla(5), 1)
        .unwrap_err();
    assert_eq!(err.code(), "register-width-mismatch");
}

#[test]
fn pinned_replay_accepts_only_its_program() {
    let executor = ReplayExecutor::from_record(pinned_record(0.25));
    let config = EstimateConfig::new(3, 3);
    let capabilities = Capabilities {
        encoder: &PhaseKickbackEncoder,
        executor: &executor,
    };
    // means [2/3, 1, 0, 1/3] -> [1, 1, 0, 0] -> reversed [0, 0, 1, 1] -> 0.011
    assert_eq!(estimate(-0.25, &config, capabilities).unwrap(), -0.375);

    let err = estimate(0.5, &config, capabilities).unwrap_err();
    assert_eq!(err.code(), "program-mismatch");
}

#[test]
fn replay_loads_record_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    std::fs::write(&path, to_json(&pinned_record(0.25)).unwrap()).unwrap();
    let executor = ReplayExecutor::load(&path).unwrap();
    assert_eq!(executor.record().measurements, batch());
    assert!(!executor.record().provenance.program_hash.is_empty());
}

#[test]
fn register_lists_data_then_ancilla() {
    let register = Register::with_ancilla(3);
    assert_eq!(register.indices(), vec![0, 1, 2, 3]);
    assert_eq!(register.data(), &[0, 1, 2]);
    assert_eq!(register.ancilla(), 3);
    assert_eq!(register.len(), 4);
}
