use jgrad_core::{ErrorInfo, GradError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::batch::MeasurementBatch;
use crate::hash::canonical_batch_hash;

/// On-disk form of a recorded measurement batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Schema version of the record.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Where the measurements came from.
    #[serde(default)]
    pub provenance: RunProvenance,
    /// Canonical hash of `measurements`; filled in on save when empty.
    #[serde(default)]
    pub batch_hash: String,
    /// Raw outcomes, one row per trial.
    pub measurements: MeasurementBatch,
}

impl BatchRecord {
    /// Wraps a batch with default schema and the given provenance.
    pub fn new(measurements: MeasurementBatch, provenance: RunProvenance) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            provenance,
            batch_hash: canonical_batch_hash(&measurements),
            measurements,
        }
    }
}

/// Serializes a batch record to a JSON string.
pub fn to_json(record: &BatchRecord) -> Result<String, GradError> {
    let mut payload = record.clone();
    if payload.batch_hash.is_empty() {
        payload.batch_hash = canonical_batch_hash(&payload.measurements);
    }
    serde_json::to_string_pretty(&payload)
        .map_err(|err| GradError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a batch record from a JSON string, checking any recorded hash.
pub fn from_json(data: &str) -> Result<BatchRecord, GradError> {
    let record: BatchRecord = serde_json::from_str(data)
        .map_err(|err| GradError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    verify_hash(&record)?;
    Ok(record)
}

/// Serializes a batch record into a binary blob.
pub fn to_bytes(record: &BatchRecord) -> Result<Vec<u8>, GradError> {
    let json = to_json(record)?;
    bincode::serialize(&json)
        .map_err(|err| GradError::Serde(ErrorInfo::new("bincode-serialize", err.to_string())))
}

/// Rehydrates a batch record from a binary blob.
pub fn from_bytes(bytes: &[u8]) -> Result<BatchRecord, GradError> {
    let json: String = bincode::deserialize(bytes)
        .map_err(|err| GradError::Serde(ErrorInfo::new("bincode-deserialize", err.to_string())))?;
    from_json(&json)
}

fn verify_hash(record: &BatchRecord) -> Result<(), GradError> {
    if record.batch_hash.is_empty() {
        return Ok(());
    }
    let actual = canonical_batch_hash(&record.measurements);
    if actual != record.batch_hash {
        let info = ErrorInfo::new("batch-hash-mismatch", "recorded batch hash does not match rows")
            .with_context("recorded", record.batch_hash.clone())
            .with_context("actual", actual);
        return Err(GradError::Serde(info));
    }
    Ok(())
}
