//! Scenario D: sensor present, nothing enrolled.
//!
//! `NotEnrolled` is published and, on the modern tier, the enrollment
//! trigger opens the enrollment screen with the requested authenticators.
//! Hardware problems never open it.

use authgate_contracts::{authenticator::PlatformTier, error::AuthGateResult};
use authgate_policy::PolicySelector;

use crate::{
    device::SimulatedDevice,
    harness::Harness,
    prompt::ScriptedPrompt,
    scenarios::ScenarioReport,
};

pub async fn run_scenario(tier: PlatformTier, selector: &PolicySelector) -> AuthGateResult<ScenarioReport> {
    println!("=== Scenario D: Nothing Enrolled ===");
    println!();

    let harness = Harness::start(
        tier,
        selector,
        SimulatedDevice::unenrolled(),
        ScriptedPrompt::new(Vec::new()),
    )?;

    println!("  Device:         sensor ready, nothing enrolled");
    println!("  Tier:           {:?}", tier);
    println!(
        "  Guided enroll:  {}",
        if tier.supports_guided_enrollment() { "supported" } else { "unsupported" }
    );
    println!();

    let outcomes = harness.authenticate().await?;
    let report = ScenarioReport {
        name: "Scenario D",
        outcomes,
        summary: harness.finish().await?,
    };

    for launch in &report.summary.enrollment_launches {
        println!("  Enrollment requested:   {}", launch);
    }
    report.print();

    Ok(report)
}
