//! Prompt configuration schema.
//!
//! A `PromptConfig` is deserialized from TOML. It holds the prompt text and,
//! per platform tier, the authenticator set to request.
//!
//! Example:
//! ```toml
//! [prompt]
//! title = "Level up authenticate method!"
//! description = "Hello...."
//! negative_button_text = "Cancel"
//!
//! [tiers.legacy]
//! authenticators = ["strong-biometric"]
//!
//! [tiers.modern]
//! authenticators = ["strong-biometric", "device-credential"]
//! ```

use serde::{Deserialize, Serialize};

use authgate_contracts::authenticator::{AuthenticatorSet, PlatformTier};

/// Text shown on the native prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptText {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Label of the dismiss button. Only attached to prompts whose
    /// authenticator set lacks the device credential; with the credential
    /// the platform shows its own fallback instead.
    pub negative_button_text: Option<String>,
}

/// The authenticator set requested on one platform tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub authenticators: AuthenticatorSet,
}

/// Per-tier rules. Both tiers must be declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub legacy: TierRule,
    pub modern: TierRule,
}

impl TierTable {
    pub fn rule(&self, tier: PlatformTier) -> &TierRule {
        match tier {
            PlatformTier::Legacy => &self.legacy,
            PlatformTier::Modern => &self.modern,
        }
    }
}

/// The top-level structure deserialized from a TOML prompt configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub prompt: PromptText,
    pub tiers: TierTable,
}

impl Default for PromptConfig {
    /// Strong biometric or device credential on modern platforms; strong
    /// biometric with a "Cancel" button on legacy ones.
    fn default() -> Self {
        Self {
            prompt: PromptText {
                title: "Level up authenticate method!".to_string(),
                description: "Hello....".to_string(),
                negative_button_text: Some("Cancel".to_string()),
            },
            tiers: TierTable {
                legacy: TierRule {
                    authenticators: AuthenticatorSet::strong_biometric(),
                },
                modern: TierRule {
                    authenticators: AuthenticatorSet::strong_biometric_or_credential(),
                },
            },
        }
    }
}
