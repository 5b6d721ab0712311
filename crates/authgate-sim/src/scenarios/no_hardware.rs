//! Scenario A: a device with no biometric sensor.
//!
//! The classifier reports `NoHardware`, the orchestrator publishes a single
//! `FeatureUnavailable`, and the prompt is never shown.

use authgate_contracts::{
    authenticator::PlatformTier, error::AuthGateResult, outcome::AuthenticationMethod,
};
use authgate_policy::PolicySelector;

use crate::{
    device::SimulatedDevice,
    harness::Harness,
    prompt::{PromptSignal, ScriptedPrompt},
    scenarios::ScenarioReport,
};

pub async fn run_scenario(tier: PlatformTier, selector: &PolicySelector) -> AuthGateResult<ScenarioReport> {
    println!("=== Scenario A: No Biometric Hardware ===");
    println!();

    let device = SimulatedDevice::without_sensor();
    // Never replayed: the prompt must not come up.
    let prompt = ScriptedPrompt::new(vec![PromptSignal::Accept(AuthenticationMethod::Biometric)]);
    let harness = Harness::start(tier, selector, device, prompt)?;

    println!("  Device:         no sensor, nothing enrolled");
    println!("  Tier:           {:?}", tier);
    println!("  Authenticators: {}", harness.policy().authenticators());
    println!();

    let outcomes = harness.authenticate().await?;
    let report = ScenarioReport {
        name: "Scenario A",
        outcomes,
        summary: harness.finish().await?,
    };
    report.print();

    Ok(report)
}
