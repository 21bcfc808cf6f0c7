//! Provenance and schema descriptors shared across jgrad artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance attached to recorded measurement batches and estimate traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Free-form label of the backend that produced the measurements.
    pub backend: String,
    /// Canonical hash of the program that was executed, if known.
    #[serde(default)]
    pub program_hash: String,
    /// ISO-8601 timestamp recording when the artifact was generated.
    #[serde(default)]
    pub created_at: String,
    /// Version map for all tools involved in the run.
    #[serde(default)]
    pub tool_versions: BTreeMap<String, String>,
}
