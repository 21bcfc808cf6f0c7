use std::error::Error;

use clap::Args;
use jgrad_codec::encode;
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Real number strictly inside (-1, 1).
    #[arg(long, allow_negative_numbers = true)]
    pub value: f64,
    /// Number of fractional bits to emit.
    #[arg(long, default_value_t = 16)]
    pub precision: usize,
}

#[derive(Debug, Serialize)]
struct EncodeReport {
    value: f64,
    precision: usize,
    fraction: String,
    bits: Vec<u8>,
    negative: bool,
    literal: f64,
    decoded: f64,
}

pub fn run(args: &EncodeArgs) -> Result<(), Box<dyn Error>> {
    let fraction = encode(args.value, args.precision)?;
    let report = EncodeReport {
        value: args.value,
        precision: args.precision,
        fraction: fraction.to_string(),
        bits: fraction.bits().to_vec(),
        negative: fraction.is_negative(),
        literal: fraction.to_decimal_literal(),
        decoded: fraction.value(),
    };
    print_canonical(&report)
}
