use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Serialize};

use crate::batch::MeasurementBatch;
use crate::fraction::BinaryFraction;

/// Intermediate values produced while reducing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Per-column mean of the outcomes, in register order.
    pub column_means: Vec<f64>,
    /// Column means rounded to 0/1, in register order.
    pub majority: Vec<u8>,
    /// Consensus fraction after reversing and dropping the ancilla column.
    pub fraction: BinaryFraction,
}

/// Mean outcome of every column.
pub fn column_means(batch: &MeasurementBatch) -> Vec<f64> {
    let mut sums = vec![0u64; batch.width()];
    for row in batch.rows() {
        for (sum, &outcome) in sums.iter_mut().zip(row) {
            *sum += u64::from(outcome);
        }
    }
    let count = batch.len() as f64;
    sums.into_iter().map(|sum| sum as f64 / count).collect()
}

/// Rounds each mean to the nearest bit. An exact `0.5` rounds to even, i.e. 0.
pub fn majority_bits(means: &[f64]) -> Vec<u8> {
    means
        .iter()
        .map(|&mean| if mean.round_ties_even() >= 1.0 { 1 } else { 0 })
        .collect()
}

/// Reverses the register-ordered bits and drops the leading element.
///
/// The register is `[d0, .., d(p-1), ancilla]` and phase bits come out
/// least-significant first, so the result is `reverse(bits)[1..]`: the
/// ancilla is removed and the data bits read most-significant first.
pub fn reverse_and_drop_ancilla(bits: &[u8]) -> Vec<u8> {
    bits.iter().rev().skip(1).copied().collect()
}

/// Reduces a batch to its consensus fraction and the intermediate values.
pub fn summarize(batch: &MeasurementBatch) -> Result<BatchSummary, GradError> {
    if batch.is_empty() {
        return Err(GradError::invalid_input(
            "empty-batch",
            "cannot aggregate an empty measurement batch",
        ));
    }
    if batch.width() < 2 {
        let info = ErrorInfo::new(
            "batch-too-narrow",
            "rows need at least one data column besides the ancilla",
        )
        .with_context("width", batch.width().to_string());
        return Err(GradError::InvalidInput(info));
    }

    let column_means = column_means(batch);
    let majority = majority_bits(&column_means);
    let fraction = BinaryFraction::from_parts(false, reverse_and_drop_ancilla(&majority));
    Ok(BatchSummary {
        column_means,
        majority,
        fraction,
    })
}

/// Reduces a batch to one non-negative consensus fraction.
pub fn aggregate(batch: &MeasurementBatch) -> Result<BinaryFraction, GradError> {
    summarize(batch).map(|summary| summary.fraction)
}

/// Validates raw rows and aggregates them.
pub fn aggregate_rows(rows: Vec<Vec<u8>>) -> Result<BinaryFraction, GradError> {
    aggregate(&MeasurementBatch::from_rows(rows)?)
}
