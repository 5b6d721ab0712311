//! In-memory outcome journal.
//!
//! `OutcomeJournal` keeps every outcome it observes in a `Vec` behind a
//! `Mutex`. It is an ordinary subscriber of the result stream: it only sees
//! outcomes published after it subscribed, and it never slows the producer.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use authgate_contracts::{
    error::{AuthGateError, AuthGateResult},
    outcome::OutcomeEvent,
};
use authgate_core::stream::OutcomeSubscription;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{JournalEntry, JournalLog, OutcomeRecord},
};

pub(crate) struct JournalState {
    pub(crate) entries: Vec<JournalEntry>,
    pub(crate) last_hash: String,
}

/// An append-only journal of published outcomes backed by a SHA-256 chain.
pub struct OutcomeJournal {
    journal_id: String,
    pub(crate) state: Arc<Mutex<JournalState>>,
}

impl OutcomeJournal {
    pub fn new(journal_id: impl Into<String>) -> Self {
        Self {
            journal_id: journal_id.into(),
            state: Arc::new(Mutex::new(JournalState {
                entries: Vec::new(),
                last_hash: JournalEntry::GENESIS_HASH.to_string(),
            })),
        }
    }

    /// Append one published outcome to the chain.
    pub fn record(&self, event: &OutcomeEvent) -> AuthGateResult<()> {
        let mut state = self.state.lock().map_err(|e| AuthGateError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })?;

        let record = OutcomeRecord::from(event);
        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(&self.journal_id, sequence, &record, &prev_hash)?;

        debug!(
            journal_id = %self.journal_id,
            sequence,
            request_id = %record.request_id,
            kind = ?record.kind,
            "outcome journaled"
        );

        state.entries.push(JournalEntry {
            sequence,
            journal_id: self.journal_id.clone(),
            record,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export a sealed copy of every entry written so far.
    pub fn export_log(&self) -> AuthGateResult<JournalLog> {
        let state = self.state.lock().map_err(|e| AuthGateError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })?;
        let terminal_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(JournalLog {
            journal_id: self.journal_id.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        })
    }

    /// Check that the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }

    /// Record every event from `subscription` on a tokio task until the
    /// stream closes.
    pub fn spawn_recorder(self: Arc<Self>, mut subscription: OutcomeSubscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                if let Err(err) = self.record(&event) {
                    warn!(request_id = %event.request_id, error = %err, "failed to journal outcome");
                }
            }
            info!(
                journal_id = %self.journal_id,
                entries = self.len(),
                "result stream closed; journal recorder stopped"
            );
        })
    }
}
