use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use jgrad_codec::{from_json, summarize};
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// JSON batch record with measurement rows in register order.
    #[arg(long)]
    pub batch: PathBuf,
}

#[derive(Debug, Serialize)]
struct AggregateReport {
    batch_hash: String,
    rows: usize,
    width: usize,
    column_means: Vec<f64>,
    majority: Vec<u8>,
    fraction: String,
    value: f64,
}

pub fn run(args: &AggregateArgs) -> Result<(), Box<dyn Error>> {
    let data = fs::read_to_string(&args.batch)?;
    let record = from_json(&data)?;
    let summary = summarize(&record.measurements)?;
    let report = AggregateReport {
        batch_hash: record.batch_hash,
        rows: record.measurements.len(),
        width: record.measurements.width(),
        value: summary.fraction.value(),
        fraction: summary.fraction.to_string(),
        column_means: summary.column_means,
        majority: summary.majority,
    };
    print_canonical(&report)
}
