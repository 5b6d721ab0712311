//! # authgate-sim
//!
//! Simulated platform for the authentication orchestrator.
//!
//! Provides a device whose sensor and enrollment state are set by hand, a
//! prompt that replays a script of user actions from its own thread, and a
//! recording enrollment launcher. The reference scenarios run these against
//! the real orchestrator, journal, and enrollment trigger:
//!
//! - **A** no sensor: `FeatureUnavailable`, prompt never shown.
//! - **B** first touch matches: `Success`.
//! - **C** two rejections then a match: `Failed`, `Failed`, `Success`.
//! - **D** nothing enrolled: `NotEnrolled`, enrollment opened on modern tiers.
//! - **E** lockout: `Failed` x5 then the platform's `Error` text.

pub mod device;
pub mod enrollment;
pub mod harness;
pub mod prompt;
pub mod scenarios;

pub use device::SimulatedDevice;
pub use enrollment::RecordingEnrollment;
pub use harness::{Harness, HarnessSummary};
pub use prompt::{PromptSignal, ScriptedPrompt, SimulatedSession};
