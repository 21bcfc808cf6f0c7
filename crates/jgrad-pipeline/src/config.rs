use std::fs;
use std::path::Path;

use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of one gradient estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Bit depth of the estimate (data qubits).
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Number of repeated trials requested from the executor.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
}

fn default_precision() -> usize {
    16
}

fn default_sample_count() -> usize {
    50
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            sample_count: default_sample_count(),
        }
    }
}

impl EstimateConfig {
    /// Creates a configuration with explicit fields.
    pub fn new(precision: usize, sample_count: usize) -> Self {
        Self {
            precision,
            sample_count,
        }
    }

    /// Rejects zero precision or zero samples.
    pub fn validate(&self) -> Result<(), GradError> {
        if self.precision == 0 {
            return Err(GradError::invalid_input(
                "zero-precision",
                "precision must be at least one bit",
            ));
        }
        if self.sample_count == 0 {
            return Err(GradError::invalid_input(
                "zero-samples",
                "sample count must be at least one",
            ));
        }
        Ok(())
    }

    /// Parses a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(data: &str) -> Result<Self, GradError> {
        let config: Self = serde_yaml::from_str(data)
            .map_err(|err| GradError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, GradError> {
        let data = fs::read_to_string(path).map_err(|err| {
            GradError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&data)
    }
}
