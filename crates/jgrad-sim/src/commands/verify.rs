use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use jgrad_pipeline::{replay_reference, trace, PhaseKickbackEncoder, ReferenceCase};
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Reference case JSON with recorded measurements and expected outputs.
    #[arg(long)]
    pub case: PathBuf,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    fraction: String,
    expected_fraction: String,
    estimate: f64,
    expected_estimate: f64,
    reproduced: bool,
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let case: ReferenceCase = trace::load(&args.case)?;
    let outcome = replay_reference(&case, &PhaseKickbackEncoder)?;
    let report = VerifyReport {
        reproduced: outcome.is_match(),
        fraction: outcome.trace.fraction,
        expected_fraction: case.expected_fraction,
        estimate: outcome.trace.estimate,
        expected_estimate: case.expected_estimate,
    };
    print_canonical(&report)?;
    if !report.reproduced {
        return Err(format!("reference case {} no longer reproduces", args.case.display()).into());
    }
    Ok(())
}
