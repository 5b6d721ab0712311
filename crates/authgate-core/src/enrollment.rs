//! The enrollment trigger: an observer that sends the user to enrollment.
//!
//! The orchestrator exposes no enrollment API. This observer watches the
//! result stream and launches the external enrollment flow, with the same
//! authenticator set the prompt asks for, when (and only when) a
//! `NotEnrolled` outcome arrives on a platform tier that supports guided
//! enrollment.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use authgate_contracts::{
    authenticator::{AuthenticatorSet, PlatformTier},
    error::AuthGateResult,
    outcome::{AuthenticationOutcome, OutcomeEvent},
};

use crate::{stream::OutcomeSubscription, traits::EnrollmentLauncher};

pub struct EnrollmentTrigger {
    tier: PlatformTier,
    authenticators: AuthenticatorSet,
    launcher: Arc<dyn EnrollmentLauncher>,
}

impl EnrollmentTrigger {
    pub fn new(
        tier: PlatformTier,
        authenticators: AuthenticatorSet,
        launcher: Arc<dyn EnrollmentLauncher>,
    ) -> Self {
        Self {
            tier,
            authenticators,
            launcher,
        }
    }

    /// React to one published event.
    ///
    /// Returns `Ok(true)` when enrollment was launched.
    pub fn observe(&self, event: &OutcomeEvent) -> AuthGateResult<bool> {
        if !matches!(event.outcome, AuthenticationOutcome::NotEnrolled) {
            return Ok(false);
        }

        if !self.tier.supports_guided_enrollment() {
            debug!(
                request_id = %event.request_id,
                tier = ?self.tier,
                "guided enrollment unsupported on this tier"
            );
            return Ok(false);
        }

        info!(
            request_id = %event.request_id,
            authenticators = %self.authenticators,
            "launching enrollment flow"
        );
        self.launcher.launch(&self.authenticators)?;
        Ok(true)
    }

    /// Observe `subscription` on a tokio task until the stream closes.
    ///
    /// Launch failures are logged and the task keeps listening.
    pub fn spawn(self, mut subscription: OutcomeSubscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                if let Err(err) = self.observe(&event) {
                    warn!(request_id = %event.request_id, error = %err, "enrollment launch failed");
                }
            }
            debug!("result stream closed; enrollment trigger stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use authgate_contracts::{
        authenticator::{AuthenticatorSet, PlatformTier},
        error::{AuthGateError, AuthGateResult},
        outcome::{AuthenticationOutcome, OutcomeEvent, RequestId},
    };

    use crate::{stream::ResultStream, traits::EnrollmentLauncher};

    use super::EnrollmentTrigger;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<AuthenticatorSet>>,
        fail: bool,
    }

    impl EnrollmentLauncher for RecordingLauncher {
        fn launch(&self, authenticators: &AuthenticatorSet) -> AuthGateResult<()> {
            self.launched.lock().unwrap().push(authenticators.clone());
            if self.fail {
                return Err(AuthGateError::EnrollmentFailed {
                    reason: "settings activity not found".to_string(),
                });
            }
            Ok(())
        }
    }

    fn event(outcome: AuthenticationOutcome) -> OutcomeEvent {
        OutcomeEvent::new(RequestId::new(), outcome)
    }

    #[test]
    fn test_launches_only_for_not_enrolled() {
        let launcher = Arc::new(RecordingLauncher::default());
        let trigger = EnrollmentTrigger::new(
            PlatformTier::Modern,
            AuthenticatorSet::strong_biometric_or_credential(),
            launcher.clone(),
        );

        for outcome in [
            AuthenticationOutcome::HardwareUnavailable,
            AuthenticationOutcome::FeatureUnavailable,
            AuthenticationOutcome::Failed,
            AuthenticationOutcome::Error { message: "Canceled".to_string() },
        ] {
            assert!(!trigger.observe(&event(outcome)).unwrap());
        }
        assert!(launcher.launched.lock().unwrap().is_empty());

        assert!(trigger.observe(&event(AuthenticationOutcome::NotEnrolled)).unwrap());
        assert_eq!(
            *launcher.launched.lock().unwrap(),
            vec![AuthenticatorSet::strong_biometric_or_credential()]
        );
    }

    #[test]
    fn test_legacy_tier_never_launches() {
        let launcher = Arc::new(RecordingLauncher::default());
        let trigger = EnrollmentTrigger::new(
            PlatformTier::Legacy,
            AuthenticatorSet::strong_biometric(),
            launcher.clone(),
        );

        assert!(!trigger.observe(&event(AuthenticationOutcome::NotEnrolled)).unwrap());
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn test_launch_failure_is_returned() {
        let launcher = Arc::new(RecordingLauncher {
            fail: true,
            ..RecordingLauncher::default()
        });
        let trigger = EnrollmentTrigger::new(
            PlatformTier::Modern,
            AuthenticatorSet::strong_biometric_or_credential(),
            launcher,
        );

        let result = trigger.observe(&event(AuthenticationOutcome::NotEnrolled));
        assert!(matches!(result, Err(AuthGateError::EnrollmentFailed { .. })));
    }

    #[tokio::test]
    async fn test_spawned_trigger_runs_until_stream_closes() {
        let stream = ResultStream::new();
        let launcher = Arc::new(RecordingLauncher::default());
        let handle = EnrollmentTrigger::new(
            PlatformTier::Modern,
            AuthenticatorSet::strong_biometric_or_credential(),
            launcher.clone(),
        )
        .spawn(stream.subscribe());

        stream.publish(event(AuthenticationOutcome::FeatureUnavailable));
        stream.publish(event(AuthenticationOutcome::NotEnrolled));
        drop(stream);

        handle.await.unwrap();
        assert_eq!(launcher.launched.lock().unwrap().len(), 1);
    }
}
