//! Cloud provider and credential type enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown provider string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    invalid_value: Box<str>,
}

impl ParseProviderError {
    fn new(value: &str) -> Self {
        Self {
            invalid_value: value.into(),
        }
    }

    /// Returns the invalid value that caused the parse failure.
    #[must_use]
    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid provider '{}': expected one of 'AWS', 'AZURE', 'GCP'",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseProviderError {}

/// The cloud a connection record points at.
///
/// Selects the shape of the record's credentials, the legal credential types
/// and the shape of its event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    /// Amazon Web Services.
    Aws,
    /// Microsoft Azure.
    Azure,
    /// Google Cloud Platform.
    Gcp,
}

impl Provider {
    /// All providers in display order.
    pub const ALL: [Self; 3] = [Self::Aws, Self::Azure, Self::Gcp];

    /// Returns the wire identifier (`"AWS"`, `"AZURE"`, `"GCP"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "AZURE",
            Self::Gcp => "GCP",
        }
    }

    /// Returns the human-readable display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aws => "Amazon Web Services",
            Self::Azure => "Microsoft Azure",
            Self::Gcp => "Google Cloud Platform",
        }
    }

    /// Returns the credential type a fresh draft for this provider starts with.
    #[must_use]
    pub const fn default_credential_type(self) -> CredentialType {
        match self {
            Self::Aws => CredentialType::AccessKey,
            Self::Azure => CredentialType::Application,
            Self::Gcp => CredentialType::JsonText,
        }
    }

    /// Returns the credential types that are legal for this provider.
    #[must_use]
    pub const fn credential_types(self) -> &'static [CredentialType] {
        match self {
            Self::Aws => &[
                CredentialType::AccessKey,
                CredentialType::AssumeRole,
                CredentialType::RolesAnywhere,
            ],
            Self::Azure => &[CredentialType::Application],
            Self::Gcp => &[CredentialType::JsonText],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AWS" => Ok(Self::Aws),
            "AZURE" => Ok(Self::Azure),
            "GCP" => Ok(Self::Gcp),
            _ => Err(ParseProviderError::new(s)),
        }
    }
}

/// How a record authenticates against its provider.
///
/// Each type belongs to exactly one provider; see [`Provider::credential_types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    /// AWS static access key pair.
    AccessKey,
    /// AWS role assumed from a base key pair.
    AssumeRole,
    /// AWS IAM Roles Anywhere.
    RolesAnywhere,
    /// Azure application (service principal) secret.
    Application,
    /// GCP service account JSON key.
    JsonText,
}

impl CredentialType {
    /// Returns the wire identifier (e.g. `"ACCESS_KEY"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessKey => "ACCESS_KEY",
            Self::AssumeRole => "ASSUME_ROLE",
            Self::RolesAnywhere => "ROLES_ANYWHERE",
            Self::Application => "APPLICATION",
            Self::JsonText => "JSON_TEXT",
        }
    }

    /// Returns the provider this credential type belongs to.
    #[must_use]
    pub const fn provider(self) -> Provider {
        match self {
            Self::AccessKey | Self::AssumeRole | Self::RolesAnywhere => Provider::Aws,
            Self::Application => Provider::Azure,
            Self::JsonText => Provider::Gcp,
        }
    }

    /// Returns `true` if this type may be selected for `provider`.
    #[must_use]
    pub fn is_legal_for(self, provider: Provider) -> bool {
        self.provider() == provider
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "ACCESS_KEY" => Ok(Self::AccessKey),
            "ASSUME_ROLE" => Ok(Self::AssumeRole),
            "ROLES_ANYWHERE" => Ok(Self::RolesAnywhere),
            "APPLICATION" => Ok(Self::Application),
            "JSON_TEXT" => Ok(Self::JsonText),
            _ => Err(format!(
                "invalid credential type '{s}': expected one of 'ACCESS_KEY', 'ASSUME_ROLE', \
                 'ROLES_ANYWHERE', 'APPLICATION', 'JSON_TEXT'"
            )),
        }
    }
}
