use jgrad_codec::{canonical_batch_hash, decode_from_text, summarize};
use jgrad_core::{ErrorInfo, GradError, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::config::EstimateConfig;
use crate::executor::{Executor, Register};
use crate::program::OracleEncoder;

/// External collaborators used by one estimate.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    /// Turns a perturbation magnitude into a program.
    pub encoder: &'a dyn OracleEncoder,
    /// Runs the program and returns measurement rows.
    pub executor: &'a dyn Executor,
}

impl std::fmt::Debug for Capabilities<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// Every intermediate value of one estimate, for regression pinning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateTrace {
    /// Schema version of the trace payload.
    pub schema_version: SchemaVersion,
    /// Oracle value at the perturbed point.
    pub f_h: f64,
    /// Configuration used for the run.
    pub config: EstimateConfig,
    /// Whether the perturbation sign was negative.
    pub negative: bool,
    /// Canonical hash of the executed program.
    pub program_hash: String,
    /// Canonical hash of the returned measurement batch.
    pub batch_hash: String,
    /// Per-column mean outcomes in register order.
    pub column_means: Vec<f64>,
    /// Rounded column means in register order.
    pub majority: Vec<u8>,
    /// Signed binary fraction in text form.
    pub fraction: String,
    /// Final gradient estimate.
    pub estimate: f64,
}

/// Estimates the gradient encoded in `f_h`.
pub fn estimate(
    f_h: f64,
    config: &EstimateConfig,
    capabilities: Capabilities<'_>,
) -> Result<f64, GradError> {
    estimate_with_trace(f_h, config, capabilities).map(|trace| trace.estimate)
}

/// Estimates the gradient encoded in `f_h` and records each stage.
pub fn estimate_with_trace(
    f_h: f64,
    config: &EstimateConfig,
    capabilities: Capabilities<'_>,
) -> Result<EstimateTrace, GradError> {
    validate_perturbation(f_h)?;
    config.validate()?;

    let span = debug_span!("estimate", f_h, precision = config.precision);
    let _guard = span.enter();

    let negative = f_h < 0.0;
    let magnitude = f_h.abs();

    let program = capabilities
        .encoder
        .build_program(magnitude, config.precision)?;
    let program_hash = program.canonical_hash()?;
    debug!(%program_hash, instructions = program.instructions.len(), "program built");

    let register = Register::with_ancilla(config.precision);
    let batch = capabilities
        .executor
        .run(&program, &register, config.sample_count)?;
    if batch.len() != config.sample_count || batch.width() != register.len() {
        let info = ErrorInfo::new("batch-shape-mismatch", "executor returned an unexpected batch shape")
            .with_context("rows", batch.len().to_string())
            .with_context("expected_rows", config.sample_count.to_string())
            .with_context("width", batch.width().to_string())
            .with_context("expected_width", register.len().to_string());
        return Err(GradError::Backend(info));
    }
    let batch_hash = canonical_batch_hash(&batch);
    debug!(rows = batch.len(), %batch_hash, "measurements collected");

    let summary = summarize(&batch)?;
    let signed = summary.fraction.with_sign_of(f_h);
    let fraction = signed.to_string();
    let estimate = decode_from_text(&fraction)?;
    info!(%fraction, estimate, "gradient estimated");

    Ok(EstimateTrace {
        schema_version: SchemaVersion::default(),
        f_h,
        config: *config,
        negative,
        program_hash,
        batch_hash,
        column_means: summary.column_means,
        majority: summary.majority,
        fraction,
        estimate,
    })
}

fn validate_perturbation(f_h: f64) -> Result<(), GradError> {
    if f_h.is_finite() && f_h.abs() < 1.0 {
        return Ok(());
    }
    let info = ErrorInfo::new("perturbation-out-of-domain", "perturbation value must satisfy |f_h| < 1")
        .with_context("f_h", f_h.to_string())
        .with_hint("rescale the oracle or shrink the perturbation step");
    Err(GradError::InvalidInput(info))
}
