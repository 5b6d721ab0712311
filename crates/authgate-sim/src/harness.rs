//! Wires a simulated device and prompt to a real orchestrator, with the
//! outcome journal and enrollment trigger subscribed as observers.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use authgate_audit::{JournalLog, OutcomeJournal};
use authgate_contracts::{
    authenticator::{AuthenticatorPolicy, AuthenticatorSet, PlatformTier},
    error::{AuthGateError, AuthGateResult},
    outcome::AuthenticationOutcome,
};
use authgate_core::{CapabilityClassifier, EnrollmentTrigger, Orchestrator};
use authgate_policy::PolicySelector;

use crate::{device::SimulatedDevice, enrollment::RecordingEnrollment, prompt::ScriptedPrompt};

/// Default wait for a terminal outcome in `authenticate`.
pub const OUTCOME_TIMEOUT: Duration = Duration::from_secs(5);

/// What the observers saw once the harness is shut down.
#[derive(Debug)]
pub struct HarnessSummary {
    pub prompts_shown: usize,
    pub enrollment_launches: Vec<AuthenticatorSet>,
    pub journal: JournalLog,
    pub journal_intact: bool,
}

pub struct Harness {
    orchestrator: Orchestrator,
    policy: AuthenticatorPolicy,
    prompt: ScriptedPrompt,
    launcher: Arc<RecordingEnrollment>,
    journal: Arc<OutcomeJournal>,
    observers: Vec<JoinHandle<()>>,
    timeout: Duration,
}

impl Harness {
    /// Build the orchestrator and start the observers.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(
        tier: PlatformTier,
        selector: &PolicySelector,
        device: SimulatedDevice,
        prompt: ScriptedPrompt,
    ) -> AuthGateResult<Self> {
        let policy = selector.select(tier)?;

        let orchestrator = Orchestrator::new(
            Box::new(CapabilityClassifier::new(device)),
            Box::new(prompt.clone()),
        );

        let launcher = Arc::new(RecordingEnrollment::new());
        let journal = Arc::new(OutcomeJournal::new(format!("{:?}-device", tier).to_lowercase()));

        let trigger = EnrollmentTrigger::new(tier, policy.authenticators().clone(), launcher.clone());
        let observers = vec![
            trigger.spawn(orchestrator.subscribe()),
            Arc::clone(&journal).spawn_recorder(orchestrator.subscribe()),
        ];

        Ok(Self {
            orchestrator,
            policy,
            prompt,
            launcher,
            journal,
            observers,
            timeout: OUTCOME_TIMEOUT,
        })
    }

    /// How long `authenticate` waits for a terminal outcome.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> &AuthenticatorPolicy {
        &self.policy
    }

    /// Run one request and collect its outcomes up to the terminal one.
    pub async fn authenticate(&self) -> AuthGateResult<Vec<AuthenticationOutcome>> {
        let mut outcomes = self.orchestrator.subscribe();
        let request_id = self.orchestrator.request_authentication(&self.policy)?;

        let mut collected = Vec::new();
        let wait = async {
            while let Some(event) = outcomes.recv().await {
                if event.request_id != request_id {
                    continue;
                }
                let terminal = event.outcome.is_terminal();
                collected.push(event.outcome);
                if terminal {
                    break;
                }
            }
        };

        tokio::time::timeout(self.timeout, wait)
            .await
            .map_err(|_| AuthGateError::OutcomeTimeout {
                request_id,
                waited_ms: self.timeout.as_millis() as u64,
            })?;

        Ok(collected)
    }

    /// Drop the orchestrator, let the observers drain, and report.
    pub async fn finish(self) -> AuthGateResult<HarnessSummary> {
        let Harness {
            orchestrator,
            prompt,
            launcher,
            journal,
            observers,
            ..
        } = self;

        // The stream closes once the orchestrator and every outstanding
        // prompt callback are gone.
        drop(orchestrator);
        for observer in observers {
            if let Err(err) = observer.await {
                warn!(error = %err, "observer task ended abnormally");
            }
        }

        Ok(HarnessSummary {
            prompts_shown: prompt.presentations(),
            enrollment_launches: launcher.launches(),
            journal_intact: journal.verify_integrity(),
            journal: journal.export_log()?,
        })
    }
}
