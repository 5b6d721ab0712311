//! # authgate-policy
//!
//! TOML-driven selection of the authenticator policy for a platform tier.
//!
//! ## Overview
//!
//! This crate provides [`PolicySelector`], which turns a [`PromptConfig`]
//! into an `AuthenticatorPolicy` for the tier the host platform reports.
//! Richer combined biometric + credential sets are only configured for the
//! modern tier; the legacy tier gets a biometric-only set and a negative
//! button.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use authgate_policy::PolicySelector;
//!
//! let selector = PolicySelector::from_file(Path::new("config/prompt.toml"))?;
//! let policy = selector.select(PlatformTier::Modern)?;
//! // Pass `policy` to `Orchestrator::request_authentication(...)`.
//! ```

pub mod config;
pub mod selector;

pub use config::{PromptConfig, PromptText, TierRule, TierTable};
pub use selector::PolicySelector;

// ── Tests ─────────────────────────────────────────────────────────────────────
