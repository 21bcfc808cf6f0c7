#![deny(missing_docs)]
#![doc = "Gradient estimation via phase kickback: validate, build a program, run it, aggregate the readout and decode the consensus fraction."]

/// YAML configuration for an estimate.
pub mod config;
/// Execution backend contract and the replay executor.
pub mod executor;
/// Stateless estimate pipeline.
pub mod pipeline;
/// Oracle-encoding contract and the phase-kickback program encoder.
pub mod program;
/// Reference traces and their JSON persistence.
pub mod trace;

pub use config::EstimateConfig;
pub use executor::{Executor, Register, ReplayExecutor};
pub use pipeline::{estimate, estimate_with_trace, Capabilities, EstimateTrace};
pub use program::{Instruction, KickbackProgram, OracleEncoder, PhaseKickbackEncoder, PhaseUnitary};
pub use trace::{replay_reference, to_canonical_json_bytes, ReferenceCase, ReferenceOutcome};
