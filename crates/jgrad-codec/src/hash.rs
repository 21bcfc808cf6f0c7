use sha2::{Digest, Sha256};

use crate::batch::MeasurementBatch;

/// Computes the canonical structural hash of a measurement batch.
///
/// Row order is part of the hash; two permutations of the same trials hash
/// differently even though they aggregate identically.
pub fn canonical_batch_hash(batch: &MeasurementBatch) -> String {
    let mut hasher = Sha256::new();
    hasher.update((batch.len() as u64).to_le_bytes());
    hasher.update((batch.width() as u64).to_le_bytes());
    for row in batch.rows() {
        hasher.update(row);
    }

    let digest = hasher.finalize();
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
