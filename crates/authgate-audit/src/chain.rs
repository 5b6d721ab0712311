//! Hash-chain primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. journal_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the outcome record

use sha2::{Digest, Sha256};

use authgate_contracts::error::{AuthGateError, AuthGateResult};

use crate::entry::{JournalEntry, OutcomeRecord};

/// Compute the lowercase hex SHA-256 for one journal entry.
pub fn hash_entry(
    journal_id: &str,
    sequence: u64,
    record: &OutcomeRecord,
    prev_hash: &str,
) -> AuthGateResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| AuthGateError::JournalWriteFailed {
        reason: format!("outcome record not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(journal_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify linkage and hash correctness of a chain.
///
/// An empty chain is valid. Any entry whose `prev_hash` does not match its
/// predecessor, or whose `this_hash` cannot be recomputed, invalidates it.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH.to_string();

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&entry.journal_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
