//! The authentication orchestrator: capability gate, prompt driver, and
//! sole producer on the result stream.
//!
//! Per request:
//!
//!   Idle → Classifying → [non-ready] publish terminal outcome → Idle
//!   Idle → Classifying → PromptActive → Failed* → Success | Error → Idle
//!
//! `PromptPresenter::present()` is NEVER called unless the capability query
//! returned `CapabilityStatus::Ready`. The only call site sits after the
//! classification branch below.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use authgate_contracts::{
    authenticator::AuthenticatorPolicy,
    error::{AuthGateError, AuthGateResult},
    outcome::{Attestation, AuthenticationOutcome, OutcomeEvent, RequestId},
};

use crate::{
    stream::{OutcomeSubscription, ResultStream},
    traits::{AuthenticationCallback, DeviceCapability, PromptPresenter},
};

/// Where the orchestrator is in the per-request state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Classifying(RequestId),
    PromptActive(RequestId),
}

impl OrchestratorState {
    /// The request currently holding the prompt slot, if any.
    pub fn active_request(&self) -> Option<RequestId> {
        match self {
            Self::Idle => None,
            Self::Classifying(id) | Self::PromptActive(id) => Some(*id),
        }
    }
}

/// State shared between the orchestrator and the callbacks it hands out.
struct Shared {
    state: Mutex<OrchestratorState>,
    stream: ResultStream,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, OrchestratorState> {
        // A panic elsewhere must not wedge the platform callback thread.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a prompt signal for `request_id`.
    ///
    /// Signals for a request that no longer holds the prompt (already
    /// terminal, or superseded) are dropped. The state lock is held across
    /// the check and the publish so signals keep their arrival order.
    fn deliver(&self, request_id: RequestId, outcome: AuthenticationOutcome) -> bool {
        let mut state = self.lock_state();
        if *state != OrchestratorState::PromptActive(request_id) {
            debug!(
                request_id = %request_id,
                outcome = ?outcome.kind(),
                "ignoring prompt signal for inactive request"
            );
            return false;
        }

        let terminal = outcome.is_terminal();
        if terminal {
            info!(request_id = %request_id, outcome = ?outcome.kind(), "authentication finished");
        } else {
            debug!(request_id = %request_id, "biometric rejected; prompt remains active");
        }

        self.stream.publish(OutcomeEvent::new(request_id, outcome));
        if terminal {
            *state = OrchestratorState::Idle;
        }
        true
    }
}

/// The callback object handed to the prompt collaborator for one request.
///
/// Cheap to clone and safe to call from any thread. Every signal is
/// published immediately; nothing blocks.
#[derive(Clone)]
pub struct PromptCallbacks {
    request_id: RequestId,
    shared: Arc<Shared>,
}

impl AuthenticationCallback for PromptCallbacks {
    fn on_error(&self, message: String) {
        self.shared
            .deliver(self.request_id, AuthenticationOutcome::Error { message });
    }

    fn on_success(&self, attestation: Attestation) {
        self.shared
            .deliver(self.request_id, AuthenticationOutcome::Success { attestation });
    }

    fn on_failed(&self) {
        self.shared.deliver(self.request_id, AuthenticationOutcome::Failed);
    }
}

/// Drives authentication requests and owns the result stream.
///
/// Construct once per host window/activity. The device capability query and
/// the prompt collaborator are injected so the orchestrator runs without
/// any UI runtime.
pub struct Orchestrator {
    capability: Box<dyn DeviceCapability>,
    presenter: Box<dyn PromptPresenter>,
    shared: Arc<Shared>,
}

impl Orchestrator {
    /// Create an orchestrator with a default-capacity result stream.
    pub fn new(capability: Box<dyn DeviceCapability>, presenter: Box<dyn PromptPresenter>) -> Self {
        Self::with_stream(capability, presenter, ResultStream::new())
    }

    pub fn with_stream(
        capability: Box<dyn DeviceCapability>,
        presenter: Box<dyn PromptPresenter>,
        stream: ResultStream,
    ) -> Self {
        Self {
            capability,
            presenter,
            shared: Arc::new(Shared {
                state: Mutex::new(OrchestratorState::Idle),
                stream,
            }),
        }
    }

    /// Subscribe to outcomes published from now on.
    pub fn subscribe(&self) -> OutcomeSubscription {
        self.shared.stream.subscribe()
    }

    pub fn state(&self) -> OrchestratorState {
        *self.shared.lock_state()
    }

    /// Start one authentication attempt.
    ///
    /// Returns as soon as the outcome is published (capability failure) or
    /// the prompt has been handed off. Outcomes arrive on the result stream,
    /// tagged with the returned `RequestId`.
    ///
    /// # Pipeline
    ///
    /// 1. Claim the prompt slot; reject if another request holds it
    /// 2. Classify the policy's authenticator set:
    ///    - non-`Ready` → publish the mapped outcome, release the slot, return
    ///    - `Ready` → continue
    /// 3. Present the prompt. **Only reachable after step 2 returns `Ready`**
    /// 4. If presenting fails outright, publish `Error` with the platform's
    ///    message and release the slot
    ///
    /// # Errors
    ///
    /// `AuthGateError::PromptAlreadyActive` when a previous request has not
    /// reached a terminal outcome. Nothing is published in that case.
    /// Capability failures and prompt faults are NOT errors; they are
    /// published outcomes.
    pub fn request_authentication(&self, policy: &AuthenticatorPolicy) -> AuthGateResult<RequestId> {
        let request_id = RequestId::new();

        // ── Step 1: Claim the prompt slot ────────────────────────────────────
        {
            let mut state = self.shared.lock_state();
            if let Some(active) = state.active_request() {
                warn!(
                    request_id = %request_id,
                    active = %active,
                    "rejecting request while another prompt is active"
                );
                return Err(AuthGateError::PromptAlreadyActive { active });
            }
            *state = OrchestratorState::Classifying(request_id);
        }
        let slot = SlotGuard::new(&self.shared, request_id);

        debug!(
            request_id = %request_id,
            authenticators = %policy.authenticators(),
            title = %policy.title(),
            "authentication requested"
        );

        // ── Step 2: Capability gate ──────────────────────────────────────────
        //
        // The device is read without holding the state lock; the slot is
        // already ours.
        let status = self.capability.can_authenticate(policy.authenticators());

        if let Some(outcome) = AuthenticationOutcome::from_status(status) {
            warn!(
                request_id = %request_id,
                status = %status,
                advice = status.advice().unwrap_or_default(),
                "device cannot authenticate; prompt not shown"
            );

            let mut state = self.shared.lock_state();
            self.shared.stream.publish(OutcomeEvent::new(request_id, outcome));
            *state = OrchestratorState::Idle;
            slot.disarm();
            return Ok(request_id);
        }

        *self.shared.lock_state() = OrchestratorState::PromptActive(request_id);

        // ── Step 3: Present the prompt ───────────────────────────────────────
        //
        // No lock is held here: the presenter may fire callbacks before
        // `present` returns.
        let callbacks = PromptCallbacks {
            request_id,
            shared: Arc::clone(&self.shared),
        };

        let presented = self.presenter.present(policy, Arc::new(callbacks));
        slot.disarm();

        if let Err(err) = presented {
            // ── Step 4: Prompt fault ─────────────────────────────────────────
            let message = match err {
                AuthGateError::PromptFailed { message } => message,
                other => other.to_string(),
            };
            warn!(request_id = %request_id, error = %message, "prompt could not be presented");
            self.shared
                .deliver(request_id, AuthenticationOutcome::Error { message });
        }

        Ok(request_id)
    }
}

/// Releases the prompt slot if `request_authentication` unwinds before the
/// prompt has been handed off.
struct SlotGuard<'a> {
    shared: &'a Shared,
    request_id: RequestId,
    armed: bool,
}

impl<'a> SlotGuard<'a> {
    fn new(shared: &'a Shared, request_id: RequestId) -> Self {
        Self {
            shared,
            request_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.shared.lock_state();
        if state.active_request() == Some(self.request_id) {
            warn!(request_id = %self.request_id, "request aborted; releasing prompt slot");
            *state = OrchestratorState::Idle;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
