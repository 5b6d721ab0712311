//! Scenario C: two rejected touches, then a match.
//!
//! `Failed` is non-terminal, so both rejections are published on the same
//! request and the prompt stays up until the success.

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
    println!("=== Scenario C: Retry Then Match ===");
    println!();

    let device = SimulatedDevice::ready(AuthenticatorSet::strong_biometric());
    let prompt = ScriptedPrompt::new(vec![
        PromptSignal::Reject,
        PromptSignal::Reject,
        PromptSignal::Accept(AuthenticationMethod::Biometric),
    ]);
    let harness = Harness::start(tier, selector, device, prompt)?;

    println!("  Device:         sensor ready, strong biometric enrolled");
    println!("  Script:         reject, reject, match");
    println!();

    let outcomes = harness.authenticate().await?;
    let report = ScenarioReport {
        name: "Scenario C",
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
        outcome::{AuthenticationOutcome, OutcomeKind},
    };
    use authgate_policy::PolicySelector;

    use super::run_scenario;

    #[tokio::test]
    async fn test_failed_failed_success() {
        let report = run_scenario(PlatformTier::Modern, &PolicySelector::default())
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.outcomes[0], AuthenticationOutcome::Failed);
        assert_eq!(report.outcomes[1], AuthenticationOutcome::Failed);
        assert!(matches!(report.outcomes[2], AuthenticationOutcome::Success { .. }));
        assert_eq!(report.summary.prompts_shown, 1, "retries happen inside one prompt");
    }

    /// Every event of the request lands in the journal, in order and with
    /// the same request id.
    #[tokio::test]
    async fn test_journal_order() {
        let report = run_scenario(PlatformTier::Modern, &PolicySelector::default())
            .await
            .unwrap();

        let entries = &report.summary.journal.entries;
        let kinds: Vec<OutcomeKind> = entries.iter().map(|e| e.record.kind).collect();
        assert_eq!(
            kinds,
            vec![OutcomeKind::Failed, OutcomeKind::Failed, OutcomeKind::Success]
        );
        assert!(entries
            .iter()
            .all(|e| e.record.request_id == entries[0].record.request_id));
        assert!(report.summary.journal_intact);
    }
}
