//! # authgate-contracts
//!
//! Shared types and error contracts for the authgate orchestrator.
//!
//! All crates in the workspace import from here. No orchestration logic
//! lives in this crate, only data definitions and the error type.

pub mod authenticator;
pub mod device;
pub mod error;
pub mod outcome;

#[cfg(test)]
mod tests {
    use super::*;
    use authenticator::{AuthenticatorClass, AuthenticatorPolicy, AuthenticatorSet, PlatformTier};
    use device::CapabilityStatus;
    use error::AuthGateError;
    use outcome::{Attestation, AuthenticationMethod, AuthenticationOutcome, OutcomeKind, RequestId};

    // ── AuthenticatorSet ─────────────────────────────────────────────────────

    #[test]
    fn test_authenticator_set_dedups_and_sorts() {
        let set = AuthenticatorSet::new([
            AuthenticatorClass::DeviceCredential,
            AuthenticatorClass::StrongBiometric,
            AuthenticatorClass::DeviceCredential,
        ]);

        assert_eq!(set, AuthenticatorSet::strong_biometric_or_credential());
        assert_eq!(set.iter().count(), 2);
        assert_eq!(set.to_string(), "{strong-biometric, device-credential}");
    }

    #[test]
    fn test_authenticator_set_hardware_and_combined_flags() {
        let credential_only = AuthenticatorSet::new([AuthenticatorClass::DeviceCredential]);
        assert!(!credential_only.requires_biometric_hardware());
        assert!(!credential_only.is_combined());

        assert!(AuthenticatorSet::strong_biometric().requires_biometric_hardware());
        assert!(!AuthenticatorSet::strong_biometric().is_combined());
        assert!(AuthenticatorSet::strong_biometric_or_credential().is_combined());
    }

    #[test]
    fn test_authenticator_set_intersects() {
        let enrolled = AuthenticatorSet::new([AuthenticatorClass::DeviceCredential]);
        assert!(AuthenticatorSet::strong_biometric_or_credential().intersects(&enrolled));
        assert!(!AuthenticatorSet::strong_biometric().intersects(&enrolled));
        assert!(!AuthenticatorSet::default().intersects(&enrolled));
    }

    #[test]
    fn test_authenticator_set_decodes_from_kebab_case_list() {
        let json = r#"["device-credential", "strong-biometric"]"#;
        let set: AuthenticatorSet = serde_json::from_str(json).unwrap();
        assert_eq!(set, AuthenticatorSet::strong_biometric_or_credential());
    }

    #[test]
    fn test_platform_tier_capabilities() {
        assert!(PlatformTier::Modern.supports_combined_authenticators());
        assert!(PlatformTier::Modern.supports_guided_enrollment());
        assert!(!PlatformTier::Legacy.supports_combined_authenticators());
        assert!(!PlatformTier::Legacy.supports_guided_enrollment());
    }

    // ── AuthenticatorPolicy validation ───────────────────────────────────────

    #[test]
    fn test_policy_biometric_only_requires_negative_button() {
        let result = AuthenticatorPolicy::builder()
            .authenticators(AuthenticatorSet::strong_biometric())
            .title("Unlock")
            .build();

        match result {
            Err(AuthGateError::InvalidPolicy { reason }) => {
                assert!(reason.contains("negative button text is required"), "{reason}");
            }
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }

        let policy = AuthenticatorPolicy::builder()
            .authenticators(AuthenticatorSet::strong_biometric())
            .title("Unlock")
            .description("Confirm it's you")
            .negative_button_text("Cancel")
            .build()
            .unwrap();
        assert_eq!(policy.negative_button_text(), Some("Cancel"));
        assert_eq!(policy.description(), "Confirm it's you");
    }

    #[test]
    fn test_policy_with_credential_rejects_negative_button() {
        let result = AuthenticatorPolicy::builder()
            .authenticators(AuthenticatorSet::strong_biometric_or_credential())
            .title("Unlock")
            .negative_button_text("Cancel")
            .build();

        assert!(matches!(result, Err(AuthGateError::InvalidPolicy { .. })));

        let policy = AuthenticatorPolicy::builder()
            .authenticators(AuthenticatorSet::strong_biometric_or_credential())
            .title("Unlock")
            .build()
            .unwrap();
        assert_eq!(policy.negative_button_text(), None);
    }

    #[test]
    fn test_policy_rejects_empty_set_and_blank_title() {
        let empty = AuthenticatorPolicy::builder().title("Unlock").build();
        match empty {
            Err(AuthGateError::InvalidPolicy { reason }) => assert!(reason.contains("empty")),
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }

        let blank = AuthenticatorPolicy::builder()
            .authenticators(AuthenticatorSet::strong_biometric_or_credential())
            .title("   ")
            .build();
        match blank {
            Err(AuthGateError::InvalidPolicy { reason }) => assert!(reason.contains("title")),
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }
    }

    // ── Outcomes ─────────────────────────────────────────────────────────────

    #[test]
    fn test_status_maps_to_outcome() {
        assert_eq!(AuthenticationOutcome::from_status(CapabilityStatus::Ready), None);
        assert_eq!(
            AuthenticationOutcome::from_status(CapabilityStatus::HardwareUnavailable),
            Some(AuthenticationOutcome::HardwareUnavailable)
        );
        assert_eq!(
            AuthenticationOutcome::from_status(CapabilityStatus::NoHardware),
            Some(AuthenticationOutcome::FeatureUnavailable)
        );
        assert_eq!(
            AuthenticationOutcome::from_status(CapabilityStatus::NotEnrolled),
            Some(AuthenticationOutcome::NotEnrolled)
        );
    }

    #[test]
    fn test_only_failed_is_non_terminal() {
        let attestation = Attestation::new(AuthenticationMethod::Biometric, ());
        let outcomes = [
            AuthenticationOutcome::HardwareUnavailable,
            AuthenticationOutcome::FeatureUnavailable,
            AuthenticationOutcome::NotEnrolled,
            AuthenticationOutcome::Error { message: "Canceled".to_string() },
            AuthenticationOutcome::Success { attestation },
        ];
        for outcome in &outcomes {
            assert!(outcome.is_terminal(), "{:?} should be terminal", outcome.kind());
        }
        assert!(!AuthenticationOutcome::Failed.is_terminal());
    }

    #[test]
    fn test_outcome_display_messages() {
        assert_eq!(AuthenticationOutcome::NotEnrolled.to_string(), "Authentication not set");
        assert_eq!(AuthenticationOutcome::Failed.to_string(), "Authentication failed");
        assert_eq!(AuthenticationOutcome::FeatureUnavailable.to_string(), "Feature unavailable");

        // Platform diagnostics pass through untouched.
        let err = AuthenticationOutcome::Error {
            message: "Too many attempts. Try again later.".to_string(),
        };
        assert_eq!(err.to_string(), "Too many attempts. Try again later.");
        assert_eq!(err.kind(), OutcomeKind::Error);
    }

    #[test]
    fn test_attestation_forwards_opaque_proof() {
        #[derive(Debug, PartialEq)]
        struct SessionToken(u64);

        let attestation = Attestation::new(AuthenticationMethod::DeviceCredential, SessionToken(7));
        assert_eq!(attestation.method(), AuthenticationMethod::DeviceCredential);
        assert_eq!(attestation.downcast_ref::<SessionToken>(), Some(&SessionToken(7)));
        assert!(attestation.downcast_ref::<String>().is_none());

        // Clones share the proof; separately built attestations do not.
        let clone = attestation.clone();
        assert_eq!(attestation, clone);
        let other = Attestation::new(AuthenticationMethod::DeviceCredential, SessionToken(7));
        assert_ne!(attestation, other);
    }

    #[test]
    fn test_capability_advice_only_for_failures() {
        assert!(CapabilityStatus::Ready.advice().is_none());
        assert!(CapabilityStatus::NotEnrolled
            .advice()
            .unwrap()
            .contains("No biometrics enrolled"));
    }

    // ── RequestId ────────────────────────────────────────────────────────────

    #[test]
    fn test_request_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<RequestId> = (0..100).map(|_| RequestId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    // ── AuthGateError display messages ───────────────────────────────────────

    #[test]
    fn test_error_prompt_already_active_display() {
        let active = RequestId::new();
        let err = AuthGateError::PromptAlreadyActive { active };
        let msg = err.to_string();
        assert!(msg.contains("already active"));
        assert!(msg.contains(&active.to_string()));
    }

    #[test]
    fn test_error_prompt_failed_display() {
        let err = AuthGateError::PromptFailed {
            message: "activity destroyed".to_string(),
        };
        assert!(err.to_string().contains("activity destroyed"));
    }

    #[test]
    fn test_error_outcome_timeout_display() {
        let request_id = RequestId::new();
        let err = AuthGateError::OutcomeTimeout {
            request_id,
            waited_ms: 250,
        };
        let msg = err.to_string();
        assert!(msg.contains(&request_id.to_string()));
        assert!(msg.contains("250 ms"));
    }
}
