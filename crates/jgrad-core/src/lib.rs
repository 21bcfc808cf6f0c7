#![deny(missing_docs)]
#![doc = "Core error, provenance and tracing types shared by the jgrad gradient estimator crates."]

pub mod errors;
pub mod provenance;
pub mod telemetry;

pub use errors::{ErrorInfo, GradError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use telemetry::{init_tracing, InitError};
