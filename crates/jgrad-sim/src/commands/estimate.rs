use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use jgrad_pipeline::{
    estimate_with_trace, trace, Capabilities, EstimateConfig, PhaseKickbackEncoder,
    ReplayExecutor,
};
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Oracle value at the perturbed point, strictly inside (-1, 1).
    #[arg(long = "f-h", allow_negative_numbers = true)]
    pub f_h: f64,
    /// JSON batch record served by the replay executor.
    #[arg(long)]
    pub batch: PathBuf,
    /// Optional YAML configuration; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the configured precision.
    #[arg(long)]
    pub precision: Option<usize>,
    /// Override the configured sample count.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Write the full estimate trace to this path.
    #[arg(long)]
    pub trace_out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EstimateReport {
    f_h: f64,
    precision: usize,
    sample_count: usize,
    fraction: String,
    estimate: f64,
}

pub fn run(args: &EstimateArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let executor = ReplayExecutor::load(&args.batch)?;
    let capabilities = Capabilities {
        encoder: &PhaseKickbackEncoder,
        executor: &executor,
    };
    let trace = estimate_with_trace(args.f_h, &config, capabilities)?;
    if let Some(path) = &args.trace_out {
        trace::save(path, &trace)?;
    }
    let report = EstimateReport {
        f_h: trace.f_h,
        precision: config.precision,
        sample_count: config.sample_count,
        fraction: trace.fraction,
        estimate: trace.estimate,
    };
    print_canonical(&report)
}

fn resolve_config(args: &EstimateArgs) -> Result<EstimateConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EstimateConfig::load(path)?,
        None => EstimateConfig::default(),
    };
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(samples) = args.samples {
        config.sample_count = samples;
    }
    Ok(config)
}
