//! Simulated device hardware and enrollment.
//!
//! Stands in for the platform's biometric manager. The state can be changed
//! between requests to model a sensor going busy or a user enrolling.

use std::sync::{Arc, Mutex, PoisonError};

use authgate_contracts::{authenticator::AuthenticatorSet, device::DeviceState};
use authgate_core::traits::DeviceStateProvider;

/// A device whose hardware and enrollment state is set by the scenario.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl SimulatedDevice {
    pub fn new(state: DeviceState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Sensor present and working, `enrolled` registered.
    pub fn ready(enrolled: AuthenticatorSet) -> Self {
        Self::new(DeviceState::ready(enrolled))
    }

    /// No biometric sensor at all.
    pub fn without_sensor() -> Self {
        Self::new(DeviceState::without_hardware(AuthenticatorSet::default()))
    }

    /// Sensor present but busy.
    pub fn busy_sensor(enrolled: AuthenticatorSet) -> Self {
        Self::new(DeviceState {
            hardware_present: true,
            hardware_unavailable: true,
            enrolled,
        })
    }

    /// Sensor present, nothing enrolled.
    pub fn unenrolled() -> Self {
        Self::ready(AuthenticatorSet::default())
    }

    pub fn set_state(&self, state: DeviceState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl DeviceStateProvider for SimulatedDevice {
    fn device_state(&self) -> DeviceState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
