//! Scenario E: repeated rejections end in a platform lockout.
//!
//! The lockout arrives as a terminal `Error` carrying the platform's text
//! unmodified. A signal the platform sends after that is dropped.

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

pub const LOCKOUT_MESSAGE: &str = "Too many attempts. Try again later.";

/// Rejections before the platform locks the sensor.
const MAX_ATTEMPTS: usize = 5;

pub async fn run_scenario(tier: PlatformTier, selector: &PolicySelector) -> AuthGateResult<ScenarioReport> {
    println!("=== Scenario E: Lockout ===");
    println!();

    let mut script = vec![PromptSignal::Reject; MAX_ATTEMPTS];
    script.push(PromptSignal::Error(LOCKOUT_MESSAGE.to_string()));
    // Late success after the lockout; must not surface.
    script.push(PromptSignal::Accept(AuthenticationMethod::Biometric));

    let harness = Harness::start(
        tier,
        selector,
        SimulatedDevice::ready(AuthenticatorSet::strong_biometric()),
        ScriptedPrompt::new(script),
    )?;

    println!("  Device:         sensor ready, strong biometric enrolled");
    println!("  Script:         {} rejections, lockout, late match", MAX_ATTEMPTS);
    println!();

    let outcomes = harness.authenticate().await?;
    let report = ScenarioReport {
        name: "Scenario E",
        outcomes,
        summary: harness.finish().await?,
    };
    report.print();

    Ok(report)
}
