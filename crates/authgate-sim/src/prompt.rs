//! A scripted stand-in for the native prompt.
//!
//! Each `present` call spawns a "platform" thread that replays the script
//! against the callback, the way a real prompt reports from a thread the
//! orchestrator does not own.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

use tracing::debug;

use authgate_contracts::{
    authenticator::AuthenticatorPolicy,
    error::{AuthGateError, AuthGateResult},
    outcome::{Attestation, AuthenticationMethod},
};
use authgate_core::traits::{AuthenticationCallback, PromptPresenter};

/// One thing the simulated user/platform does while the prompt is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSignal {
    /// A non-matching biometric (`on_failed`).
    Reject,
    /// A match or correct credential (`on_success`).
    Accept(AuthenticationMethod),
    /// Cancellation, lockout, timeout (`on_error`).
    Error(String),
}

/// The proof object the simulated platform attaches to a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedSession {
    /// Which presentation (1-based) produced this session.
    pub presentation: usize,
}

/// Prompt collaborator that replays a fixed script on every presentation.
#[derive(Debug, Clone)]
pub struct ScriptedPrompt {
    script: Arc<Vec<PromptSignal>>,
    presented: Arc<AtomicUsize>,
    delay: Duration,
    fail_with: Option<String>,
}

impl ScriptedPrompt {
    pub fn new(script: Vec<PromptSignal>) -> Self {
        Self {
            script: Arc::new(script),
            presented: Arc::new(AtomicUsize::new(0)),
            delay: Duration::from_millis(5),
            fail_with: None,
        }
    }

    /// A prompt the platform refuses to show.
    pub fn broken(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Pause between signals on the platform thread.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times the prompt has been presented.
    pub fn presentations(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }
}

impl PromptPresenter for ScriptedPrompt {
    fn present(
        &self,
        policy: &AuthenticatorPolicy,
        callback: Arc<dyn AuthenticationCallback>,
    ) -> AuthGateResult<()> {
        let presentation = self.presented.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(message) = &self.fail_with {
            return Err(AuthGateError::PromptFailed {
                message: message.clone(),
            });
        }

        debug!(
            presentation,
            title = %policy.title(),
            authenticators = %policy.authenticators(),
            "presenting simulated prompt"
        );

        let script = Arc::clone(&self.script);
        let delay = self.delay;
        thread::Builder::new()
            .name("platform-prompt".to_string())
            .spawn(move || {
                for signal in script.iter() {
                    thread::sleep(delay);
                    match signal {
                        PromptSignal::Reject => callback.on_failed(),
                        PromptSignal::Accept(method) => callback.on_success(Attestation::new(
                            *method,
                            SimulatedSession { presentation },
                        )),
                        PromptSignal::Error(message) => callback.on_error(message.clone()),
                    }
                }
            })
            .map_err(|e| AuthGateError::PromptFailed {
                message: format!("failed to start platform prompt thread: {}", e),
            })?;

        Ok(())
    }
}
