#![deny(missing_docs)]
#![doc = "Binary fraction codec and majority-vote aggregation of repeated phase-estimation measurements."]

/// Majority-vote reduction of measurement batches.
pub mod aggregate;
/// Validated measurement batch container.
pub mod batch;
/// Signed fixed-precision binary fractions and their encode/decode routines.
pub mod fraction;
/// Canonical hashing helpers for measurement batches.
pub mod hash;
/// JSON and binary round-trips for recorded batches.
pub mod serde;

pub use aggregate::{
    aggregate, aggregate_rows, column_means, majority_bits, reverse_and_drop_ancilla, summarize,
    BatchSummary,
};
pub use batch::MeasurementBatch;
pub use fraction::{decode_from_text, decode_from_value, encode, BinaryFraction};
pub use hash::canonical_batch_hash;
pub use serde::{from_bytes, from_json, to_bytes, to_json, BatchRecord};
