//! Scenario B: ready device, the first touch matches.

use authgate_contracts::{
    authenticator::{AuthenticatorSet, PlatformTier},
    error::AuthGateResult,
    outcome::AuthenticationMethod,
};
use authgate_policy::PolicySelector;

use crate::{
    device::SimulatedDevice,
    harness::Harness,
    prompt::{PromptSignal, ScriptedPrompt},
    scenarios::ScenarioReport,
};

pub async fn run_scenario(tier: PlatformTier, selector: &PolicySelector) -> AuthGateResult<ScenarioReport> {
    println!("=== Scenario B: Match on First Attempt ===");
    println!();

    let device = SimulatedDevice::ready(AuthenticatorSet::strong_biometric());
    let prompt = ScriptedPrompt::new(vec![PromptSignal::Accept(AuthenticationMethod::Biometric)]);
    let harness = Harness::start(tier, selector, device, prompt)?;

    println!("  Device:         sensor ready, strong biometric enrolled");
    println!("  Tier:           {:?}", tier);
    println!("  Authenticators: {}", harness.policy().authenticators());
    println!("  Prompt title:   {}", harness.policy().title());
    println!();

    let outcomes = harness.authenticate().await?;
    let report = ScenarioReport {
        name: "Scenario B",
        outcomes,
        summary: harness.finish().await?,
    };
    report.print();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use authgate_contracts::{
        authenticator::PlatformTier,
        outcome::{AuthenticationMethod, AuthenticationOutcome, OutcomeKind},
    };
    use authgate_policy::PolicySelector;

    use crate::prompt::SimulatedSession;

    use super::run_scenario;

    #[tokio::test]
    async fn test_single_success() {
        let report = run_scenario(PlatformTier::Modern, &PolicySelector::default())
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 1);
        match &report.outcomes[0] {
            AuthenticationOutcome::Success { attestation } => {
                assert_eq!(attestation.method(), AuthenticationMethod::Biometric);
                assert_eq!(
                    attestation.downcast_ref::<SimulatedSession>(),
                    Some(&SimulatedSession { presentation: 1 })
                );
            }
            other => panic!("expected Success, got {:?}", other),
        }
        assert_eq!(report.summary.prompts_shown, 1);
        assert!(report.summary.enrollment_launches.is_empty());
    }

    /// The journal sees the same single success.
    #[tokio::test]
    async fn test_journal_records_success() {
        let report = run_scenario(PlatformTier::Legacy, &PolicySelector::default())
            .await
            .unwrap();

        let kinds: Vec<OutcomeKind> = report
            .summary
            .journal
            .entries
            .iter()
            .map(|e| e.record.kind)
            .collect();
        assert_eq!(kinds, vec![OutcomeKind::Success]);
        assert!(report.summary.journal_intact);
    }
}
