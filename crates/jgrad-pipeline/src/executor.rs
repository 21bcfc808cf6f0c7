use std::fs;
use std::path::Path;

use jgrad_codec::serde::{from_json, BatchRecord};
use jgrad_codec::MeasurementBatch;
use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Serialize};

use crate::program::KickbackProgram;

/// Qubits read out by the executor: data qubits then the ancilla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    data: Vec<usize>,
    ancilla: usize,
}

impl Register {
    /// Data qubits `0..precision` followed by ancilla `precision`.
    pub fn with_ancilla(precision: usize) -> Self {
        Self {
            data: (0..precision).collect(),
            ancilla: precision,
        }
    }

    /// Data qubit indices.
    pub fn data(&self) -> &[usize] {
        &self.data
    }

    /// Ancilla qubit index.
    pub fn ancilla(&self) -> usize {
        self.ancilla
    }

    /// All indices in readout order.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = self.data.clone();
        indices.push(self.ancilla);
        indices
    }

    /// Number of readout positions per sample.
    pub fn len(&self) -> usize {
        self.data.len() + 1
    }

    /// Always `false`: the ancilla is always read out.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Runs a program and returns `samples` rows of readout bits.
pub trait Executor: Send + Sync {
    /// Executes `program`, measuring `register` once per sample.
    fn run(
        &self,
        program: &KickbackProgram,
        register: &Register,
        samples: usize,
    ) -> Result<MeasurementBatch, GradError>;
}

/// Serves measurements recorded from an earlier run.
///
/// When the record carries a program hash, only that program may be replayed.
#[derive(Debug, Clone)]
pub struct ReplayExecutor {
    record: BatchRecord,
}

impl ReplayExecutor {
    /// Replays an in-memory record.
    pub fn from_record(record: BatchRecord) -> Self {
        Self { record }
    }

    /// Replays a bare batch without program pinning.
    pub fn from_batch(batch: MeasurementBatch) -> Self {
        Self::from_record(BatchRecord::new(batch, Default::default()))
    }

    /// Loads a JSON batch record from disk.
    pub fn load(path: &Path) -> Result<Self, GradError> {
        let data = fs::read_to_string(path).map_err(|err| {
            GradError::Serde(
                ErrorInfo::new("batch-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Ok(Self::from_record(from_json(&data)?))
    }

    /// The underlying record.
    pub fn record(&self) -> &BatchRecord {
        &self.record
    }
}

impl Executor for ReplayExecutor {
    fn run(
        &self,
        program: &KickbackProgram,
        register: &Register,
        samples: usize,
    ) -> Result<MeasurementBatch, GradError> {
        let pinned = &self.record.provenance.program_hash;
        if !pinned.is_empty() {
            let actual = program.canonical_hash()?;
            if &actual != pinned {
                let info = ErrorInfo::new("program-mismatch", "recorded batch belongs to another program")
                    .with_context("recorded", pinned.clone())
                    .with_context("requested", actual);
                return Err(GradError::Backend(info));
            }
        }

        let batch = &self.record.measurements;
        if batch.width() != register.len() {
            let info = ErrorInfo::new("register-width-mismatch", "recorded rows do not match the register")
                .with_context("recorded_width", batch.width().to_string())
                .with_context("register_len", register.len().to_string());
            return Err(GradError::Backend(info));
        }
        if samples > batch.len() {
            let info = ErrorInfo::new("insufficient-samples", "not enough recorded rows")
                .with_context("recorded", batch.len().to_string())
                .with_context("requested", samples.to_string());
            return Err(GradError::Backend(info));
        }
        batch.take(samples)
    }
}
