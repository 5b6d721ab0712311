//! Capability classification.
//!
//! `classify` is a pure function of the requested authenticator set and a
//! `DeviceState` snapshot. Failure conditions are checked in a fixed order:
//!
//!   hardware unavailable (transient) → no hardware (permanent) → not enrolled
//!
//! The set is satisfied by any one of its classes. Hardware conditions only
//! apply when the set asks for a biometric class and no non-biometric class
//! it names is enrolled; a set the device credential can satisfy never needs
//! a sensor.

use tracing::debug;

use authgate_contracts::{
    authenticator::{AuthenticatorPolicy, AuthenticatorSet},
    device::{CapabilityStatus, DeviceState},
};

use crate::traits::{DeviceCapability, DeviceStateProvider};

/// Classify the authenticator set of `policy` against `device`.
pub fn classify(policy: &AuthenticatorPolicy, device: &DeviceState) -> CapabilityStatus {
    classify_set(policy.authenticators(), device)
}

/// Classify a bare authenticator set against `device`.
pub fn classify_set(authenticators: &AuthenticatorSet, device: &DeviceState) -> CapabilityStatus {
    if authenticators.requires_biometric_hardware() && !has_enrolled_fallback(authenticators, device) {
        if device.hardware_unavailable {
            return CapabilityStatus::HardwareUnavailable;
        }
        if !device.hardware_present {
            return CapabilityStatus::NoHardware;
        }
    }

    if !authenticators.intersects(&device.enrolled) {
        return CapabilityStatus::NotEnrolled;
    }

    CapabilityStatus::Ready
}

/// True when a requested non-biometric class is enrolled, so the prompt can
/// run without the sensor.
fn has_enrolled_fallback(authenticators: &AuthenticatorSet, device: &DeviceState) -> bool {
    authenticators
        .iter()
        .filter(|class| !class.is_biometric())
        .any(|class| device.enrolled.contains(class))
}

/// Adapts a `DeviceStateProvider` to the `DeviceCapability` query.
///
/// Reads fresh device state on every call; nothing is cached between
/// requests.
pub struct CapabilityClassifier<P> {
    provider: P,
}

impl<P: DeviceStateProvider> CapabilityClassifier<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: DeviceStateProvider> DeviceCapability for CapabilityClassifier<P> {
    fn can_authenticate(&self, authenticators: &AuthenticatorSet) -> CapabilityStatus {
        let device = self.provider.device_state();
        let status = classify_set(authenticators, &device);
        debug!(
            authenticators = %authenticators,
            hardware_present = device.hardware_present,
            hardware_unavailable = device.hardware_unavailable,
            enrolled = %device.enrolled,
            status = %status,
            "classified authenticator set"
        );
        status
    }
}
