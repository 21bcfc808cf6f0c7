use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jgrad_codec::serde::BatchRecord;
use jgrad_core::{ErrorInfo, GradError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::EstimateConfig;
use crate::executor::ReplayExecutor;
use crate::pipeline::{estimate_with_trace, Capabilities, EstimateTrace};
use crate::program::OracleEncoder;

/// Recorded inputs and expected outputs of one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCase {
    /// Oracle value at the perturbed point.
    pub f_h: f64,
    /// Configuration the reference was recorded with.
    #[serde(default)]
    pub config: EstimateConfig,
    /// Measurements returned by the backend.
    pub record: BatchRecord,
    /// Expected signed fraction text.
    pub expected_fraction: String,
    /// Expected gradient estimate.
    pub expected_estimate: f64,
}

/// Result of replaying a [`ReferenceCase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOutcome {
    /// Trace produced by the replay.
    pub trace: EstimateTrace,
    /// Whether the fraction text matched exactly.
    pub fraction_matches: bool,
    /// Whether the estimate matched exactly.
    pub estimate_matches: bool,
}

impl ReferenceOutcome {
    /// True when both fraction and estimate reproduce the reference.
    pub fn is_match(&self) -> bool {
        self.fraction_matches && self.estimate_matches
    }
}

/// Re-runs a reference case against its recorded measurements.
pub fn replay_reference(
    case: &ReferenceCase,
    encoder: &dyn OracleEncoder,
) -> Result<ReferenceOutcome, GradError> {
    let executor = ReplayExecutor::from_record(case.record.clone());
    let capabilities = Capabilities {
        encoder,
        executor: &executor,
    };
    let trace = estimate_with_trace(case.f_h, &case.config, capabilities)?;
    Ok(ReferenceOutcome {
        fraction_matches: trace.fraction == case.expected_fraction,
        estimate_matches: trace.estimate == case.expected_estimate,
        trace,
    })
}

fn serde_error(code: &str, err: impl ToString) -> GradError {
    GradError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into compact JSON bytes with sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, GradError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Serializes any trace artifact to pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, GradError> {
    serde_json::to_string_pretty(value).map_err(|err| serde_error("json-serialize", err))
}

/// Parses a trace artifact from JSON.
pub fn from_json<T: DeserializeOwned>(data: &str) -> Result<T, GradError> {
    serde_json::from_str(data).map_err(|err| serde_error("json-deserialize", err))
}

/// Reads a trace artifact from disk.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, GradError> {
    let data = fs::read_to_string(path).map_err(|err| {
        GradError::Serde(
            ErrorInfo::new("trace-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json(&data)
}

/// Writes a trace artifact to disk as pretty JSON.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), GradError> {
    let json = to_json(value)?;
    fs::write(path, json).map_err(|err| {
        GradError::Serde(
            ErrorInfo::new("trace-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
