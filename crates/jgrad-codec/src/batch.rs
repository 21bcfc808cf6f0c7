use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Serialize};

/// Repeated measurement outcomes, one row per trial.
///
/// Construction guarantees a non-empty batch of equal-width rows holding only
/// 0/1 entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct MeasurementBatch {
    rows: Vec<Vec<u8>>,
    width: usize,
}

impl MeasurementBatch {
    /// Validates and wraps raw measurement rows.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GradError> {
        let Some(first) = rows.first() else {
            return Err(GradError::invalid_input(
                "empty-batch",
                "measurement batch must contain at least one row",
            ));
        };
        let width = first.len();
        if width == 0 {
            return Err(GradError::invalid_input(
                "empty-row",
                "measurement rows must contain at least one outcome",
            ));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                let info = ErrorInfo::new("ragged-batch", "measurement rows differ in width")
                    .with_context("row", idx.to_string())
                    .with_context("expected_width", width.to_string())
                    .with_context("row_width", row.len().to_string());
                return Err(GradError::InvalidInput(info));
            }
            if let Some(col) = row.iter().position(|&outcome| outcome > 1) {
                let info = ErrorInfo::new("non-binary-outcome", "measurement outcomes must be 0 or 1")
                    .with_context("row", idx.to_string())
                    .with_context("column", col.to_string())
                    .with_context("value", row[col].to_string());
                return Err(GradError::InvalidInput(info));
            }
        }
        Ok(Self { rows, width })
    }

    /// Rows in trial order.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Number of outcomes per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of trials.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first `count` rows as a new batch.
    pub fn take(&self, count: usize) -> Result<Self, GradError> {
        Self::from_rows(self.rows.iter().take(count).cloned().collect())
    }
}

impl TryFrom<Vec<Vec<u8>>> for MeasurementBatch {
    type Error = GradError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<MeasurementBatch> for Vec<Vec<u8>> {
    fn from(batch: MeasurementBatch) -> Self {
        batch.rows
    }
}
