//! Device state and capability classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::authenticator::AuthenticatorSet;

/// A snapshot of the device's authentication hardware and enrollment.
///
/// Read from the platform at classification time; never cached across
/// requests by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    /// A biometric sensor exists on this device.
    pub hardware_present: bool,
    /// The sensor reports a transient fault or is held by another client.
    pub hardware_unavailable: bool,
    /// Authenticator classes that have at least one registered credential.
    pub enrolled: AuthenticatorSet,
}

impl DeviceState {
    /// A device with a working sensor and the given classes enrolled.
    pub fn ready(enrolled: AuthenticatorSet) -> Self {
        Self {
            hardware_present: true,
            hardware_unavailable: false,
            enrolled,
        }
    }

    /// A device without any biometric sensor.
    pub fn without_hardware(enrolled: AuthenticatorSet) -> Self {
        Self {
            hardware_present: false,
            hardware_unavailable: false,
            enrolled,
        }
    }
}

/// The result of classifying an authenticator set against device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityStatus {
    /// The prompt may proceed.
    Ready,
    /// Sensor present but temporarily unusable.
    HardwareUnavailable,
    /// No sensor exists on this device.
    NoHardware,
    /// Hardware present but no credential of a requested class is registered.
    NotEnrolled,
}

impl CapabilityStatus {
    /// Operator-facing advice for a non-ready status.
    pub fn advice(self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::HardwareUnavailable => Some("Biometric hardware unavailable. Try again later."),
            Self::NoHardware => Some("No biometric hardware available"),
            Self::NotEnrolled => Some("No biometrics enrolled. Please set up biometrics first."),
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "ready",
            Self::HardwareUnavailable => "hardware-unavailable",
            Self::NoHardware => "no-hardware",
            Self::NotEnrolled => "not-enrolled",
        };
        f.write_str(s)
    }
}
