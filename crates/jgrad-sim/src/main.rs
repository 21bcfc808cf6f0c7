use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    aggregate::{self, AggregateArgs},
    decode::{self, DecodeArgs},
    encode::{self, EncodeArgs},
    estimate::{self, EstimateArgs},
    program::{self, ProgramArgs},
    verify::{self, VerifyArgs},
    version::{self, VersionArgs},
};
use jgrad_core::{init_tracing, InitError};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "jgrad-sim", about = "Phase-kickback gradient estimator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a real number in (-1, 1) as a signed binary fraction.
    Encode(EncodeArgs),
    /// Decode a binary fraction back to a real number.
    Decode(DecodeArgs),
    /// Majority-vote a recorded measurement batch into a fraction.
    Aggregate(AggregateArgs),
    /// Emit the phase-kickback program for a perturbation magnitude.
    Program(ProgramArgs),
    /// Estimate a gradient against recorded measurements.
    Estimate(EstimateArgs),
    /// Replay a reference case and fail if it no longer reproduces.
    Verify(VerifyArgs),
    /// Print the CLI version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    match init_tracing("warn") {
        Ok(()) | Err(InitError::AlreadyInitialised) => {}
        Err(err) => return Err(Box::new(err)),
    }
    let cli = Cli::parse();
    match cli.command {
        Command::Encode(args) => encode::run(&args),
        Command::Decode(args) => decode::run(&args),
        Command::Aggregate(args) => aggregate::run(&args),
        Command::Program(args) => program::run(&args),
        Command::Estimate(args) => estimate::run(&args),
        Command::Verify(args) => verify::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
