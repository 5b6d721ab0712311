//! # authgate-audit
//!
//! Append-only, SHA-256 hash-chained journal of published authentication
//! outcomes.
//!
//! ## Overview
//!
//! The journal is one more observer of the result stream. Each outcome it
//! receives becomes a `JournalEntry` linked to the previous entry by hash.
//! Altering any entry, even a single byte of its message, breaks the chain
//! and is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use authgate_audit::OutcomeJournal;
//!
//! let journal = Arc::new(OutcomeJournal::new("device-7"));
//! let recorder = Arc::clone(&journal).spawn_recorder(orchestrator.subscribe());
//! // ... requests ...
//! assert!(journal.verify_integrity());
//! ```

pub mod chain;
pub mod entry;
pub mod journal;

pub use chain::{hash_entry, verify_chain};
pub use entry::{JournalEntry, JournalLog, OutcomeRecord};
pub use journal::OutcomeJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use authgate_contracts::outcome::{
        Attestation, AuthenticationMethod, AuthenticationOutcome, OutcomeEvent, OutcomeKind,
        RequestId,
    };
    use authgate_core::stream::ResultStream;

    use super::{JournalEntry, OutcomeJournal};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn event(outcome: AuthenticationOutcome) -> OutcomeEvent {
        OutcomeEvent::new(RequestId::new(), outcome)
    }

    fn write_three(journal: &OutcomeJournal) {
        journal.record(&event(AuthenticationOutcome::Failed)).unwrap();
        journal.record(&event(AuthenticationOutcome::Failed)).unwrap();
        journal
            .record(&event(AuthenticationOutcome::Success {
                attestation: Attestation::new(AuthenticationMethod::Biometric, ()),
            }))
            .unwrap();
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_hash_chain_integrity() {
        let journal = OutcomeJournal::new("journal-integrity");
        write_three(&journal);

        assert_eq!(journal.len(), 3);
        assert!(journal.verify_integrity(), "chain must be valid after sequential writes");
    }

    /// Rewriting a stored outcome message breaks the chain.
    #[test]
    fn test_tamper_detection() {
        let journal = OutcomeJournal::new("journal-tamper");
        journal
            .record(&event(AuthenticationOutcome::Error {
                message: "Too many attempts".to_string(),
            }))
            .unwrap();
        journal.record(&event(AuthenticationOutcome::NotEnrolled)).unwrap();

        {
            let mut state = journal.state.lock().unwrap();
            state.entries[0].record.message = "Authentication success".to_string();
        }

        assert!(!journal.verify_integrity(), "chain must detect tampering with a stored entry");
    }

    #[test]
    fn test_genesis_hash_and_sequence() {
        let journal = OutcomeJournal::new("journal-genesis");
        write_three(&journal);

        let log = journal.export_log().unwrap();
        assert_eq!(log.entries[0].prev_hash, JournalEntry::GENESIS_HASH);
        for (idx, entry) in log.entries.iter().enumerate() {
            assert_eq!(entry.sequence, idx as u64);
        }
        assert_eq!(log.terminal_hash, log.entries.last().unwrap().this_hash);
        assert!(super::verify_chain(&log.entries));
    }

    /// The journal keeps the platform message and the kind, never the proof.
    #[test]
    fn test_record_contents() {
        let journal = OutcomeJournal::new("journal-contents");
        let request_id = RequestId::new();
        journal
            .record(&OutcomeEvent::new(
                request_id,
                AuthenticationOutcome::Error {
                    message: "Fingerprint operation canceled.".to_string(),
                },
            ))
            .unwrap();

        let log = journal.export_log().unwrap();
        let record = &log.entries[0].record;
        assert_eq!(record.request_id, request_id);
        assert_eq!(record.kind, OutcomeKind::Error);
        assert_eq!(record.message, "Fingerprint operation canceled.");
    }

    /// Dropping an entry from the middle is detected.
    #[test]
    fn test_removed_entry_detected() {
        let journal = OutcomeJournal::new("journal-gap");
        write_three(&journal);

        let mut entries = journal.export_log().unwrap().entries;
        entries.remove(1);
        assert!(!super::verify_chain(&entries));
    }

    #[test]
    fn test_verify_empty() {
        let journal = OutcomeJournal::new("journal-empty");
        assert!(journal.is_empty());
        assert!(journal.verify_integrity());
        assert!(super::verify_chain(&[]));
        assert_eq!(journal.export_log().unwrap().terminal_hash, "");
    }

    #[tokio::test]
    async fn test_recorder_follows_stream() {
        let stream = ResultStream::new();
        let journal = Arc::new(OutcomeJournal::new("journal-recorder"));
        let recorder = Arc::clone(&journal).spawn_recorder(stream.subscribe());

        stream.publish(event(AuthenticationOutcome::Failed));
        stream.publish(event(AuthenticationOutcome::FeatureUnavailable));
        drop(stream);
        recorder.await.unwrap();

        let kinds: Vec<OutcomeKind> = journal
            .export_log()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.record.kind)
            .collect();
        assert_eq!(kinds, vec![OutcomeKind::Failed, OutcomeKind::FeatureUnavailable]);
        assert!(journal.verify_integrity());
    }
}
