use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Deserializer, Serialize};

/// Extra decimal digits kept when pre-rounding a magnitude before bit extraction.
const GUARD_DIGITS: usize = 2;

/// Signed fixed-precision binary fraction `[-]0.b1b2...bp`.
///
/// Bits are stored most-significant first. An all-zero fraction is always
/// positive, so `-0.000` never appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BinaryFraction {
    negative: bool,
    bits: Vec<u8>,
}

impl BinaryFraction {
    /// Builds a positive fraction from explicit bits.
    pub fn from_bits(bits: impl Into<Vec<u8>>) -> Result<Self, GradError> {
        let bits: Vec<u8> = bits.into();
        if bits.is_empty() {
            return Err(GradError::invalid_input(
                "zero-precision",
                "binary fraction requires at least one bit",
            ));
        }
        if let Some(pos) = bits.iter().position(|&bit| bit > 1) {
            let info = ErrorInfo::new("non-binary-digit", "fraction bits must be 0 or 1")
                .with_context("position", pos.to_string())
                .with_context("value", bits[pos].to_string());
            return Err(GradError::InvalidInput(info));
        }
        Ok(Self::from_parts(false, bits))
    }

    pub(crate) fn from_parts(negative: bool, bits: Vec<u8>) -> Self {
        let negative = negative && bits.iter().any(|&bit| bit == 1);
        Self { negative, bits }
    }

    /// Returns a copy carrying the sign of `sign` (zero counts as positive).
    pub fn with_sign_of(self, sign: f64) -> Self {
        Self::from_parts(sign < 0.0, self.bits)
    }

    /// Whether the fraction carries a minus sign.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Bits after the radix point, most-significant first.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of bits after the radix point.
    pub fn precision(&self) -> usize {
        self.bits.len()
    }

    /// Real value represented by the fraction.
    pub fn value(&self) -> f64 {
        let magnitude = accumulate(&self.bits);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The bit string read back as a decimal literal, e.g. `0.1010` for bits
    /// `1010`. Legacy consumers exchange fractions in this form.
    pub fn to_decimal_literal(&self) -> f64 {
        // Display output is always a valid float literal.
        self.to_string().parse().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for BinaryFraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            negative: bool,
            bits: Vec<u8>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let fraction = Self::from_bits(raw.bits).map_err(serde::de::Error::custom)?;
        Ok(Self::from_parts(raw.negative, fraction.bits))
    }
}

impl fmt::Display for BinaryFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("0.")?;
        for &bit in &self.bits {
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BinaryFraction {
    type Err = GradError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = |code: &str, message: &str| {
            GradError::MalformedRepresentation(
                ErrorInfo::new(code, message).with_context("text", text),
            )
        };

        let trimmed = text.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let Some((integer, fractional)) = body.split_once('.') else {
            return Err(malformed("missing-radix-point", "binary fraction has no decimal point"));
        };
        if !(integer.is_empty() || integer == "0") {
            return Err(malformed(
                "integer-part",
                "binary fraction must have a zero integer part",
            ));
        }
        if fractional.is_empty() {
            return Err(malformed("empty-fraction", "binary fraction has no bits"));
        }

        let mut bits = Vec::with_capacity(fractional.len());
        for ch in fractional.chars() {
            match ch {
                '0' => bits.push(0),
                '1' => bits.push(1),
                _ => {
                    return Err(malformed(
                        "non-binary-digit",
                        "binary fraction contains a digit other than 0 or 1",
                    ))
                }
            }
        }
        Ok(Self::from_parts(negative, bits))
    }
}

impl Neg for BinaryFraction {
    type Output = BinaryFraction;

    fn neg(self) -> Self::Output {
        let negative = !self.negative;
        Self::from_parts(negative, self.bits)
    }
}

/// Encodes `number` into a `precision`-bit binary fraction.
///
/// The magnitude is first rounded to `precision + 2` decimal digits so that
/// floating point noise such as `0.30000000000000004` does not leak into the
/// low bits. Rounding works on the exact stored value with ties to even, so
/// `0.4995` (stored slightly below the tie) rounds to `0.499`. Bits are then
/// peeled off by repeated doubling. A magnitude that rounds up to exactly
/// `1.0` saturates to all ones.
///
/// Fails with `InvalidInput` for `precision == 0` and for non-finite input or
/// `|number| >= 1`, which has no `0.b1b2...` form. Such values are not
/// wrapped or truncated.
pub fn encode(number: f64, precision: usize) -> Result<BinaryFraction, GradError> {
    if precision == 0 {
        return Err(GradError::invalid_input(
            "zero-precision",
            "precision must be at least one bit",
        ));
    }
    if !number.is_finite() || number.abs() >= 1.0 {
        let info = ErrorInfo::new("value-out-of-domain", "encoded magnitude must lie in [0, 1)")
            .with_context("value", number.to_string());
        return Err(GradError::InvalidInput(info));
    }

    let negative = number < 0.0;
    let mut remainder = round_to_decimals(number.abs(), precision + GUARD_DIGITS);
    if remainder >= 1.0 {
        return Ok(BinaryFraction::from_parts(negative, vec![1; precision]));
    }

    let mut bits = Vec::with_capacity(precision);
    for _ in 0..precision {
        remainder *= 2.0;
        let whole = remainder.trunc();
        bits.push(whole as u8);
        remainder -= whole;
    }
    Ok(BinaryFraction::from_parts(negative, bits))
}

/// Decodes the textual form `[-]0.<bits>` into a real number.
pub fn decode_from_text(text: &str) -> Result<f64, GradError> {
    Ok(text.parse::<BinaryFraction>()?.value())
}

/// Decodes a float whose decimal digits are binary digits (`0.1010` means
/// `0.1010₂`). The value is rendered in fixed notation with `digits`
/// fractional digits before decoding, so pass at least the fraction's
/// precision.
pub fn decode_from_value(value: f64, digits: usize) -> Result<f64, GradError> {
    if !value.is_finite() {
        let info = ErrorInfo::new("non-finite-value", "cannot decode a non-finite value")
            .with_context("value", value.to_string());
        return Err(GradError::MalformedRepresentation(info));
    }
    decode_from_text(&format!("{value:.digits$}"))
}

fn accumulate(bits: &[u8]) -> f64 {
    let mut weight = 0.5;
    let mut total = 0.0;
    for &bit in bits {
        total += f64::from(bit) * weight;
        weight *= 0.5;
    }
    total
}

fn round_to_decimals(value: f64, digits: usize) -> f64 {
    // Fixed-precision formatting is exact, so no scaled product can land on a
    // spurious tie.
    format!("{value:.digits$}").parse().unwrap_or(value)
}
