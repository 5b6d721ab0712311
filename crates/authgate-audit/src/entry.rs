//! Journal entry and log types.
//!
//! `JournalEntry` is a single link in the hash chain. It wraps an
//! `OutcomeRecord` (the serializable summary of one published outcome) with
//! a sequence number and the SHA-256 hashes that make tampering detectable.
//! `JournalLog` is the sealed export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authgate_contracts::outcome::{OutcomeEvent, OutcomeKind, RequestId};

/// What the journal keeps of one published outcome.
///
/// The attestation proof is opaque and never recorded; only the kind of
/// outcome and its human-readable message are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub request_id: RequestId,
    pub kind: OutcomeKind,
    /// `Display` text of the outcome; for errors, the platform's message.
    pub message: String,
    pub published_at: DateTime<Utc>,
}

impl From<&OutcomeEvent> for OutcomeRecord {
    fn from(event: &OutcomeEvent) -> Self {
        Self {
            request_id: event.request_id,
            kind: event.outcome.kind(),
            message: event.outcome.to_string(),
            published_at: event.published_at,
        }
    }
}

/// A single entry in the SHA-256 hash chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    pub journal_id: String,

    pub record: OutcomeRecord,

    /// Hash of the previous entry, or `GENESIS_HASH` for the first one.
    pub prev_hash: String,

    /// Hash over (journal_id, sequence, prev_hash, canonical JSON of record).
    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed export of the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLog {
    pub journal_id: String,

    /// All entries in chain order.
    pub entries: Vec<JournalEntry>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last entry. Empty if the journal is empty.
    pub terminal_hash: String,
}
