//! Authenticator classes, platform tiers, and the per-request policy.
//!
//! An `AuthenticatorPolicy` is built once per authentication request and
//! never mutated. The caller picks the authenticator set from the platform
//! tier; the classifier and orchestrator only ever evaluate the set as given.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuthGateError, AuthGateResult};

/// A category of verification mechanism the prompt may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticatorClass {
    /// Class 3 biometric: strong enough to unlock keystore-bound keys.
    StrongBiometric,
    /// Class 2 biometric: convenience unlock only.
    WeakBiometric,
    /// Device PIN, pattern, or password.
    DeviceCredential,
}

impl AuthenticatorClass {
    /// True for classes that need a biometric sensor.
    pub fn is_biometric(self) -> bool {
        matches!(self, Self::StrongBiometric | Self::WeakBiometric)
    }
}

impl fmt::Display for AuthenticatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StrongBiometric => "strong-biometric",
            Self::WeakBiometric => "weak-biometric",
            Self::DeviceCredential => "device-credential",
        };
        f.write_str(name)
    }
}

/// A duplicate-free set of authenticator classes.
///
/// Classes are kept sorted so two sets with the same members compare equal
/// and encode identically when handed to the enrollment flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<AuthenticatorClass>", into = "Vec<AuthenticatorClass>")]
pub struct AuthenticatorSet {
    classes: Vec<AuthenticatorClass>,
}

impl AuthenticatorSet {
    /// Build a set from any sequence of classes. Duplicates collapse.
    pub fn new(classes: impl IntoIterator<Item = AuthenticatorClass>) -> Self {
        let mut classes: Vec<_> = classes.into_iter().collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// `{StrongBiometric}`
    pub fn strong_biometric() -> Self {
        Self::new([AuthenticatorClass::StrongBiometric])
    }

    /// `{StrongBiometric, DeviceCredential}`
    pub fn strong_biometric_or_credential() -> Self {
        Self::new([
            AuthenticatorClass::StrongBiometric,
            AuthenticatorClass::DeviceCredential,
        ])
    }

    pub fn contains(&self, class: AuthenticatorClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AuthenticatorClass> + '_ {
        self.classes.iter().copied()
    }

    /// True when at least one requested class needs a biometric sensor.
    pub fn requires_biometric_hardware(&self) -> bool {
        self.iter().any(AuthenticatorClass::is_biometric)
    }

    /// True when the set mixes a biometric class with the device credential.
    pub fn is_combined(&self) -> bool {
        self.requires_biometric_hardware() && self.contains(AuthenticatorClass::DeviceCredential)
    }

    /// True when any class in `self` is also in `other`.
    pub fn intersects(&self, other: &AuthenticatorSet) -> bool {
        self.iter().any(|c| other.contains(c))
    }
}

impl From<Vec<AuthenticatorClass>> for AuthenticatorSet {
    fn from(classes: Vec<AuthenticatorClass>) -> Self {
        Self::new(classes)
    }
}

impl From<AuthenticatorSet> for Vec<AuthenticatorClass> {
    fn from(set: AuthenticatorSet) -> Self {
        set.classes
    }
}

impl fmt::Display for AuthenticatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Capability level of the host platform, known at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformTier {
    /// Biometric-only prompts; no guided enrollment screen.
    Legacy,
    /// Combined biometric + credential prompts and guided enrollment.
    Modern,
}

impl PlatformTier {
    pub fn supports_combined_authenticators(self) -> bool {
        matches!(self, Self::Modern)
    }

    pub fn supports_guided_enrollment(self) -> bool {
        matches!(self, Self::Modern)
    }
}

/// Prompt metadata and the authenticator set for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorPolicy {
    authenticators: AuthenticatorSet,
    title: String,
    description: String,
    negative_button_text: Option<String>,
}

impl AuthenticatorPolicy {
    pub fn builder() -> AuthenticatorPolicyBuilder {
        AuthenticatorPolicyBuilder::default()
    }

    pub fn authenticators(&self) -> &AuthenticatorSet {
        &self.authenticators
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn negative_button_text(&self) -> Option<&str> {
        self.negative_button_text.as_deref()
    }
}

/// Builder for `AuthenticatorPolicy`. Validation happens in `build()`.
#[derive(Debug, Clone, Default)]
pub struct AuthenticatorPolicyBuilder {
    authenticators: AuthenticatorSet,
    title: String,
    description: String,
    negative_button_text: Option<String>,
}

impl AuthenticatorPolicyBuilder {
    pub fn authenticators(mut self, set: AuthenticatorSet) -> Self {
        self.authenticators = set;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn negative_button_text(mut self, text: impl Into<String>) -> Self {
        self.negative_button_text = Some(text.into());
        self
    }

    /// Validate and freeze the policy.
    ///
    /// # Errors
    ///
    /// `AuthGateError::InvalidPolicy` when the set is empty, the title is
    /// blank, or the negative button does not agree with the presence of
    /// `DeviceCredential` (required without it, forbidden with it).
    pub fn build(self) -> AuthGateResult<AuthenticatorPolicy> {
        if self.authenticators.is_empty() {
            return Err(AuthGateError::InvalidPolicy {
                reason: "authenticator set must not be empty".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(AuthGateError::InvalidPolicy {
                reason: "prompt title must not be empty".to_string(),
            });
        }

        let allows_credential = self.authenticators.contains(AuthenticatorClass::DeviceCredential);
        let has_negative = self
            .negative_button_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());

        if allows_credential && has_negative {
            return Err(AuthGateError::InvalidPolicy {
                reason: format!(
                    "negative button text is not allowed when {} is requested",
                    AuthenticatorClass::DeviceCredential
                ),
            });
        }
        if !allows_credential && !has_negative {
            return Err(AuthGateError::InvalidPolicy {
                reason: format!(
                    "negative button text is required for {} without {}",
                    self.authenticators,
                    AuthenticatorClass::DeviceCredential
                ),
            });
        }

        Ok(AuthenticatorPolicy {
            authenticators: self.authenticators,
            title: self.title,
            description: self.description,
            negative_button_text: self.negative_button_text,
        })
    }
}
