//! Reference authentication scenarios.
//!
//! Each scenario wires a simulated device and a scripted prompt to a real
//! orchestrator through [`Harness`](crate::harness::Harness), runs one or
//! more requests, and returns what every observer saw.

pub mod first_try;
pub mod lockout;
pub mod no_hardware;
pub mod not_enrolled;
pub mod retry_then_match;

use authgate_contracts::outcome::AuthenticationOutcome;

use crate::harness::HarnessSummary;

/// Outcomes and observer state captured by one scenario run.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub outcomes: Vec<AuthenticationOutcome>,
    pub summary: HarnessSummary,
}

impl ScenarioReport {
    /// Print the outcome sequence and the observer summary.
    pub fn print(&self) {
        for (idx, outcome) in self.outcomes.iter().enumerate() {
            println!("  Outcome {}:              {}", idx + 1, outcome);
        }
        println!();
        println!("  Prompts shown:          {}", self.summary.prompts_shown);
        println!(
            "  Enrollment launches:    {}",
            self.summary.enrollment_launches.len()
        );
        println!(
            "  Journal integrity:      {} ({} entr{} in chain)",
            if self.summary.journal_intact { "VERIFIED" } else { "FAILED" },
            self.summary.journal.entries.len(),
            if self.summary.journal.entries.len() == 1 { "y" } else { "ies" }
        );
        println!();
        println!("  {} complete.", self.name);
        println!();
    }
}
