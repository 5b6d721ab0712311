//! Error types for the authgate workspace.
//!
//! Expected device conditions (missing hardware, nothing enrolled, a
//! non-matching biometric) are NOT errors. They travel as
//! `AuthenticationOutcome` values on the result stream. `AuthGateError` is
//! reserved for protocol misuse, bad configuration, and collaborator faults.

use thiserror::Error;

use crate::outcome::RequestId;

/// The unified error type for the authgate crates.
#[derive(Debug, Error)]
pub enum AuthGateError {
    /// A new request arrived while a prompt is still on screen.
    ///
    /// Only one prompt may be active at a time. The new request is rejected
    /// instead of being queued.
    #[error("authentication prompt already active for request {active}")]
    PromptAlreadyActive { active: RequestId },

    /// An `AuthenticatorPolicy` failed validation at construction time.
    #[error("invalid authenticator policy: {reason}")]
    InvalidPolicy { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The prompt collaborator could not present the prompt.
    ///
    /// The orchestrator converts this into an `Error` outcome carrying
    /// `message` verbatim.
    #[error("prompt presentation failed: {message}")]
    PromptFailed { message: String },

    /// A request was handed to the prompt but no terminal outcome was
    /// observed within the caller's deadline.
    #[error("no terminal outcome for request {request_id} after {waited_ms} ms")]
    OutcomeTimeout { request_id: RequestId, waited_ms: u64 },

    /// The enrollment collaborator could not launch the enrollment flow.
    #[error("enrollment launch failed: {reason}")]
    EnrollmentFailed { reason: String },

    /// The outcome journal could not persist an entry.
    #[error("journal write failed: {reason}")]
    JournalWriteFailed { reason: String },
}

/// Convenience alias used throughout the authgate crates.
pub type AuthGateResult<T> = Result<T, AuthGateError>;
