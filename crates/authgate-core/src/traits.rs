//! Collaborator trait definitions for the authentication pipeline.
//!
//! These traits mark the boundary between the orchestrator and the platform:
//!
//! - `DeviceStateProvider`   : reads sensor and enrollment state
//! - `DeviceCapability`      : inbound `can_authenticate(set)` query
//! - `PromptPresenter`       : shows the native prompt (fire-and-forget)
//! - `AuthenticationCallback`: the three signals the prompt reports back
//! - `EnrollmentLauncher`    : opens the platform enrollment flow
//!
//! The orchestrator never calls `PromptPresenter::present()` unless the
//! capability query returned `CapabilityStatus::Ready`.

use std::sync::Arc;

use authgate_contracts::{
    authenticator::{AuthenticatorPolicy, AuthenticatorSet},
    device::{CapabilityStatus, DeviceState},
    error::AuthGateResult,
    outcome::Attestation,
};

/// Source of the device's current hardware and enrollment state.
pub trait DeviceStateProvider: Send + Sync {
    /// Read the state as it is right now. Must not block on user input.
    fn device_state(&self) -> DeviceState;
}

/// The device capability query consulted before any prompt is shown.
pub trait DeviceCapability: Send + Sync {
    /// Classify `authenticators` against the device. Never downgrades the set.
    fn can_authenticate(&self, authenticators: &AuthenticatorSet) -> CapabilityStatus;
}

/// The signals a prompt reports for one request.
///
/// Implementations are invoked from platform-owned threads and must return
/// quickly: publish and get out.
pub trait AuthenticationCallback: Send + Sync {
    /// Terminal platform error (cancel, lockout, timeout). `message` is the
    /// platform's own text.
    fn on_error(&self, message: String);

    /// Terminal success with the platform's opaque proof.
    fn on_success(&self, attestation: Attestation);

    /// A biometric was presented and rejected. May fire many times before a
    /// terminal signal.
    fn on_failed(&self);
}

/// The native prompt collaborator.
pub trait PromptPresenter: Send + Sync {
    /// Show the prompt described by `policy` and report through `callback`.
    ///
    /// Must return without waiting for the user. The callback may be invoked
    /// before this returns, after it returns, or from another thread.
    ///
    /// # Errors
    ///
    /// Return `AuthGateError::PromptFailed` when the prompt cannot be shown
    /// at all. The orchestrator publishes it as an `Error` outcome.
    fn present(
        &self,
        policy: &AuthenticatorPolicy,
        callback: Arc<dyn AuthenticationCallback>,
    ) -> AuthGateResult<()>;
}

/// The external enrollment flow (e.g. a system settings screen).
pub trait EnrollmentLauncher: Send + Sync {
    /// Launch enrollment for the given authenticator classes.
    fn launch(&self, authenticators: &AuthenticatorSet) -> AuthGateResult<()>;
}
