//! TOML-driven policy selection.
//!
//! `PolicySelector` loads a `PromptConfig` from a TOML string or file and
//! builds the `AuthenticatorPolicy` for a platform tier.
//!
//! Selection:
//!
//! 1. Take the tier's authenticator set as configured. The set is never
//!    downgraded at request time; an unsupported set is rejected at load.
//! 2. Attach the negative button only when the set lacks the device
//!    credential.
//! 3. Validate through `AuthenticatorPolicy::builder()`.

use std::path::Path;

use tracing::debug;

use authgate_contracts::{
    authenticator::{AuthenticatorClass, AuthenticatorPolicy, PlatformTier},
    error::{AuthGateError, AuthGateResult},
};

use crate::config::PromptConfig;

/// Builds per-request authenticator policies from prompt configuration.
///
/// ```rust,ignore
/// use authgate_policy::PolicySelector;
///
/// let selector = PolicySelector::from_file(Path::new("config/prompt.toml"))?;
/// let policy = selector.select(PlatformTier::Modern)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicySelector {
    config: PromptConfig,
}

impl PolicySelector {
    /// Validate `config` and wrap it.
    ///
    /// Returns `AuthGateError::ConfigError` when a tier requests an empty
    /// set, or the legacy tier requests a combined biometric + credential
    /// set it cannot show.
    pub fn new(config: PromptConfig) -> AuthGateResult<Self> {
        for tier in [PlatformTier::Legacy, PlatformTier::Modern] {
            let set = &config.tiers.rule(tier).authenticators;
            if set.is_empty() {
                return Err(AuthGateError::ConfigError {
                    reason: format!("tier {:?} requests no authenticators", tier),
                });
            }
            if set.is_combined() && !tier.supports_combined_authenticators() {
                return Err(AuthGateError::ConfigError {
                    reason: format!(
                        "tier {:?} does not support combined authenticators {}",
                        tier, set
                    ),
                });
            }
        }
        Ok(Self { config })
    }

    /// Parse `s` as TOML and build a `PolicySelector`.
    ///
    /// Returns `AuthGateError::ConfigError` if the TOML is malformed, does
    /// not match `PromptConfig`, or fails tier validation.
    pub fn from_toml_str(s: &str) -> AuthGateResult<Self> {
        let config: PromptConfig = toml::from_str(s).map_err(|e| AuthGateError::ConfigError {
            reason: format!("failed to parse prompt TOML: {}", e),
        })?;
        Self::new(config)
    }

    /// Read the file at `path` and parse it as TOML prompt configuration.
    pub fn from_file(path: &Path) -> AuthGateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AuthGateError::ConfigError {
            reason: format!("failed to read prompt config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build the policy for `tier` with the configured prompt text.
    pub fn select(&self, tier: PlatformTier) -> AuthGateResult<AuthenticatorPolicy> {
        let prompt = &self.config.prompt;
        self.select_with(tier, &prompt.title, &prompt.description)
    }

    /// Build the policy for `tier` with caller-supplied title and description.
    pub fn select_with(
        &self,
        tier: PlatformTier,
        title: &str,
        description: &str,
    ) -> AuthGateResult<AuthenticatorPolicy> {
        let authenticators = self.config.tiers.rule(tier).authenticators.clone();

        debug!(tier = ?tier, authenticators = %authenticators, "selecting authenticator policy");

        let mut builder = AuthenticatorPolicy::builder()
            .authenticators(authenticators.clone())
            .title(title)
            .description(description);

        if !authenticators.contains(AuthenticatorClass::DeviceCredential) {
            if let Some(text) = &self.config.prompt.negative_button_text {
                builder = builder.negative_button_text(text.clone());
            }
        }

        builder.build()
    }
}
