//! Recording stand-in for the system enrollment screen.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use authgate_contracts::{authenticator::AuthenticatorSet, error::AuthGateResult};
use authgate_core::traits::EnrollmentLauncher;

/// Remembers every enrollment launch and the authenticator set it carried.
#[derive(Debug, Default)]
pub struct RecordingEnrollment {
    launches: Mutex<Vec<AuthenticatorSet>>,
}

impl RecordingEnrollment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launches(&self) -> Vec<AuthenticatorSet> {
        self.launches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EnrollmentLauncher for RecordingEnrollment {
    fn launch(&self, authenticators: &AuthenticatorSet) -> AuthGateResult<()> {
        info!(authenticators = %authenticators, "enrollment screen opened");
        self.launches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(authenticators.clone());
        Ok(())
    }
}
