use std::error::Error;

use clap::Args;
use jgrad_pipeline::{KickbackProgram, OracleEncoder, PhaseKickbackEncoder};
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct ProgramArgs {
    /// Perturbation magnitude in [0, 1).
    #[arg(long)]
    pub magnitude: f64,
    /// Number of data qubits.
    #[arg(long, default_value_t = 16)]
    pub precision: usize,
}

#[derive(Debug, Serialize)]
struct ProgramReport {
    program_hash: String,
    program: KickbackProgram,
}

pub fn run(args: &ProgramArgs) -> Result<(), Box<dyn Error>> {
    let program = PhaseKickbackEncoder.build_program(args.magnitude, args.precision)?;
    let report = ProgramReport {
        program_hash: program.canonical_hash()?,
        program,
    };
    print_canonical(&report)
}
