use std::error::Error;

use clap::Args;
use jgrad_codec::{decode_from_text, decode_from_value};
use serde::Serialize;

use super::print_canonical;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Fraction text such as `-0.0101`.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "value", required_unless_present = "value")]
    pub text: Option<String>,
    /// Decimal literal whose digits are read as binary digits.
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,
    /// Fractional digits to keep when formatting `--value`.
    #[arg(long, default_value_t = 16)]
    pub digits: usize,
}

#[derive(Debug, Serialize)]
struct DecodeReport {
    input: String,
    decoded: f64,
}

pub fn run(args: &DecodeArgs) -> Result<(), Box<dyn Error>> {
    let report = match (&args.text, args.value) {
        (Some(text), _) => DecodeReport {
            input: text.clone(),
            decoded: decode_from_text(text)?,
        },
        (None, Some(value)) => DecodeReport {
            input: value.to_string(),
            decoded: decode_from_value(value, args.digits)?,
        },
        (None, None) => return Err("either --text or --value is required".into()),
    };
    print_canonical(&report)
}
