//! Authentication outcomes and the events that carry them on the stream.
//!
//! Exactly one terminal outcome is published per request. A request that
//! reaches the prompt may additionally publish any number of `Failed`
//! outcomes before its terminal one.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::CapabilityStatus;

/// Unique identifier for one `request_authentication` call.
///
/// Every event published on behalf of the request carries this id, so
/// observers can tell the failures of request N from those of request N+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the platform says the user proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticationMethod {
    Biometric,
    DeviceCredential,
    Unknown,
}

/// Opaque proof returned by the platform on success.
///
/// The core never looks inside `proof`; it only forwards it. Whoever built
/// the prompt collaborator knows the concrete type and can `downcast_ref`.
#[derive(Clone)]
pub struct Attestation {
    method: AuthenticationMethod,
    proof: Arc<dyn Any + Send + Sync>,
}

impl Attestation {
    pub fn new<T: Any + Send + Sync>(method: AuthenticationMethod, proof: T) -> Self {
        Self {
            method,
            proof: Arc::new(proof),
        }
    }

    pub fn method(&self) -> AuthenticationMethod {
        self.method
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.proof.downcast_ref::<T>()
    }
}

impl fmt::Debug for Attestation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attestation")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Two attestations are equal only when they share the same proof object.
impl PartialEq for Attestation {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && std::ptr::addr_eq(Arc::as_ptr(&self.proof), Arc::as_ptr(&other.proof))
    }
}

/// The outcome of one authentication attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthenticationOutcome {
    HardwareUnavailable,
    FeatureUnavailable,
    NotEnrolled,
    /// A biometric was presented but did not match. The prompt stays up and
    /// the user may try again within the same request.
    Failed,
    /// Terminal platform error: cancellation, lockout, timeout, and so on.
    /// `message` is the platform's diagnostic text, unmodified.
    Error { message: String },
    Success { attestation: Attestation },
}

impl AuthenticationOutcome {
    /// Map a non-ready classification to the outcome published for it.
    ///
    /// Returns `None` for `Ready`, which produces no outcome of its own.
    pub fn from_status(status: CapabilityStatus) -> Option<Self> {
        match status {
            CapabilityStatus::Ready => None,
            CapabilityStatus::HardwareUnavailable => Some(Self::HardwareUnavailable),
            CapabilityStatus::NoHardware => Some(Self::FeatureUnavailable),
            CapabilityStatus::NotEnrolled => Some(Self::NotEnrolled),
        }
    }

    /// Every outcome except `Failed` ends its request.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::HardwareUnavailable => OutcomeKind::HardwareUnavailable,
            Self::FeatureUnavailable => OutcomeKind::FeatureUnavailable,
            Self::NotEnrolled => OutcomeKind::NotEnrolled,
            Self::Failed => OutcomeKind::Failed,
            Self::Error { .. } => OutcomeKind::Error,
            Self::Success { .. } => OutcomeKind::Success,
        }
    }
}

impl fmt::Display for AuthenticationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HardwareUnavailable => f.write_str("Hardware unavailable"),
            Self::FeatureUnavailable => f.write_str("Feature unavailable"),
            Self::NotEnrolled => f.write_str("Authentication not set"),
            Self::Failed => f.write_str("Authentication failed"),
            Self::Error { message } => f.write_str(message),
            Self::Success { .. } => f.write_str("Authentication success"),
        }
    }
}

/// Serializable discriminant of `AuthenticationOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    HardwareUnavailable,
    FeatureUnavailable,
    NotEnrolled,
    Failed,
    Error,
    Success,
}

/// One published outcome, tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeEvent {
    pub request_id: RequestId,
    pub outcome: AuthenticationOutcome,
    /// Wall-clock time the orchestrator published the event (UTC).
    pub published_at: DateTime<Utc>,
}

impl OutcomeEvent {
    pub fn new(request_id: RequestId, outcome: AuthenticationOutcome) -> Self {
        Self {
            request_id,
            outcome,
            published_at: Utc::now(),
        }
    }
}
