//! # authgate-core
//!
//! Device-local authentication orchestration.
//!
//! This crate provides:
//! - The collaborator traits (`DeviceStateProvider`, `DeviceCapability`,
//!   `PromptPresenter`, `AuthenticationCallback`, `EnrollmentLauncher`)
//! - The capability classifier
//! - The `Orchestrator` that gates the prompt on capability and publishes
//!   outcomes
//! - The broadcast `ResultStream` observers subscribe to
//! - The `EnrollmentTrigger` observer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use authgate_core::{CapabilityClassifier, Orchestrator};
//!
//! let orchestrator = Orchestrator::new(
//!     Box::new(CapabilityClassifier::new(device)),
//!     Box::new(prompt),
//! );
//! let mut outcomes = orchestrator.subscribe();
//! orchestrator.request_authentication(&policy)?;
//! while let Some(event) = outcomes.recv().await { /* ... */ }
//! ```

pub mod classifier;
pub mod enrollment;
pub mod orchestrator;
pub mod stream;
pub mod traits;

pub use classifier::{classify, CapabilityClassifier};
pub use enrollment::EnrollmentTrigger;
pub use orchestrator::{Orchestrator, OrchestratorState, PromptCallbacks};
pub use stream::{OutcomeSubscription, ResultStream};
