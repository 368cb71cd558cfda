//! Provider-specific credential shapes.
//!
//! A [`Credential`] is a sum type over the three providers. The concrete
//! variant always matches the owning record's provider: switching provider
//! replaces the whole value with [`defaults_for`] the new provider, so no
//! field of the previous provider's credential survives the switch.

mod editor;
pub mod mask;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::editor::editable_fields;
use crate::provider::Provider;

/// A single editable credential field, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialField {
    /// AWS access key ID.
    AccessKeyId,
    /// AWS secret access key.
    SecretAccessKey,
    /// AWS role ARN to assume.
    RoleArn,
    /// Azure directory (tenant) ID.
    TenantId,
    /// Azure subscription ID.
    SubscriptionId,
    /// Azure application (client) ID.
    ApplicationId,
    /// Azure client secret.
    SecretKey,
    /// GCP service account key JSON.
    JsonText,
    /// GCP project ID.
    ProjectId,
}

impl CredentialField {
    /// All fields across every provider.
    pub const ALL: [Self; 9] = [
        Self::AccessKeyId,
        Self::SecretAccessKey,
        Self::RoleArn,
        Self::TenantId,
        Self::SubscriptionId,
        Self::ApplicationId,
        Self::SecretKey,
        Self::JsonText,
        Self::ProjectId,
    ];

    /// Returns the camelCase wire name (e.g. `"accessKeyId"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessKeyId => "accessKeyId",
            Self::SecretAccessKey => "secretAccessKey",
            Self::RoleArn => "roleArn",
            Self::TenantId => "tenantId",
            Self::SubscriptionId => "subscriptionId",
            Self::ApplicationId => "applicationId",
            Self::SecretKey => "secretKey",
            Self::JsonText => "jsonText",
            Self::ProjectId => "projectId",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessKeyId => "Access Key ID",
            Self::SecretAccessKey => "Secret Access Key",
            Self::RoleArn => "Role ARN",
            Self::TenantId => "Tenant ID",
            Self::SubscriptionId => "Subscription ID",
            Self::ApplicationId => "Application ID",
            Self::SecretKey => "Secret Key",
            Self::JsonText => "Service Account JSON",
            Self::ProjectId => "Project ID",
        }
    }

    /// Returns the provider whose credential carries this field.
    #[must_use]
    pub const fn provider(self) -> Provider {
        match self {
            Self::AccessKeyId | Self::SecretAccessKey | Self::RoleArn => Provider::Aws,
            Self::TenantId | Self::SubscriptionId | Self::ApplicationId | Self::SecretKey => Provider::Azure,
            Self::JsonText | Self::ProjectId => Provider::Gcp,
        }
    }

    /// Returns `true` if the value must never be displayed in clear text.
    #[must_use]
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Self::SecretAccessKey | Self::SecretKey | Self::JsonText)
    }

    /// Returns `true` if the field must be non-blank for the draft to validate.
    #[must_use]
    pub fn is_required(self) -> bool {
        fields_required_for(self.provider()).contains(&self)
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CredentialField {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CredentialError::UnknownField { name: s.into() })
    }
}

/// AWS access key credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsCredential {
    /// Access key ID (e.g. `AKIA...`).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key. Sensitive.
    #[serde(default)]
    pub secret_access_key: String,
    /// Role to assume after authenticating with the key pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
}

/// Azure service principal credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AzureCredential {
    /// Directory (tenant) ID.
    #[serde(default)]
    pub tenant_id: String,
    /// Subscription ID.
    #[serde(default)]
    pub subscription_id: String,
    /// Application (client) ID.
    #[serde(default)]
    pub application_id: String,
    /// Client secret. Sensitive.
    #[serde(default)]
    pub secret_key: String,
}

/// GCP service account credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GcpCredential {
    /// Service account key file contents. Sensitive.
    #[serde(default)]
    pub json_text: String,
    /// Project the service account belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl fmt::Debug for AwsCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &mask::mask(&self.secret_access_key))
            .field("role_arn", &self.role_arn)
            .finish()
    }
}

impl fmt::Debug for AzureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureCredential")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("application_id", &self.application_id)
            .field("secret_key", &mask::mask(&self.secret_key))
            .finish()
    }
}

impl fmt::Debug for GcpCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcpCredential")
            .field("json_text", &mask::mask(&self.json_text))
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Credentials for one provider.
///
/// Serialises untagged: the provider tag lives on the owning record, so the
/// wire shape is just the variant's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Credential {
    /// AWS access key pair.
    Aws(AwsCredential),
    /// Azure service principal.
    Azure(AzureCredential),
    /// GCP service account key.
    Gcp(GcpCredential),
}

/// Returns a fresh zero-value credential for `provider`.
///
/// Required fields are present as empty strings; optional fields are absent.
#[must_use]
pub fn defaults_for(provider: Provider) -> Credential {
    match provider {
        Provider::Aws => Credential::Aws(AwsCredential::default()),
        Provider::Azure => Credential::Azure(AzureCredential::default()),
        Provider::Gcp => Credential::Gcp(GcpCredential::default()),
    }
}

/// Returns the fields that must be non-blank for `provider`.
#[must_use]
pub const fn fields_required_for(provider: Provider) -> &'static [CredentialField] {
    match provider {
        Provider::Aws => &[CredentialField::AccessKeyId, CredentialField::SecretAccessKey],
        Provider::Azure => &[
            CredentialField::TenantId,
            CredentialField::SubscriptionId,
            CredentialField::ApplicationId,
            CredentialField::SecretKey,
        ],
        Provider::Gcp => &[CredentialField::JsonText],
    }
}

impl Credential {
    /// Returns the provider this credential belongs to.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        match self {
            Self::Aws(_) => Provider::Aws,
            Self::Azure(_) => Provider::Azure,
            Self::Gcp(_) => Provider::Gcp,
        }
    }

    /// Parses a credential of `provider`'s shape from a JSON value.
    pub fn from_json(provider: Provider, value: serde_json::Value) -> Result<Self, CredentialError> {
        let shape_error = |source| CredentialError::Shape { provider, source };
        match provider {
            Provider::Aws => serde_json::from_value(value).map(Self::Aws).map_err(shape_error),
            Provider::Azure => serde_json::from_value(value).map(Self::Azure).map_err(shape_error),
            Provider::Gcp => serde_json::from_value(value).map(Self::Gcp).map_err(shape_error),
        }
    }

    /// Returns the current value of `field`, or `None` if the field is unset
    /// or does not belong to this variant.
    #[must_use]
    pub fn get(&self, field: CredentialField) -> Option<&str> {
        match (self, field) {
            (Self::Aws(c), CredentialField::AccessKeyId) => Some(&c.access_key_id),
            (Self::Aws(c), CredentialField::SecretAccessKey) => Some(&c.secret_access_key),
            (Self::Aws(c), CredentialField::RoleArn) => c.role_arn.as_deref(),
            (Self::Azure(c), CredentialField::TenantId) => Some(&c.tenant_id),
            (Self::Azure(c), CredentialField::SubscriptionId) => Some(&c.subscription_id),
            (Self::Azure(c), CredentialField::ApplicationId) => Some(&c.application_id),
            (Self::Azure(c), CredentialField::SecretKey) => Some(&c.secret_key),
            (Self::Gcp(c), CredentialField::JsonText) => Some(&c.json_text),
            (Self::Gcp(c), CredentialField::ProjectId) => c.project_id.as_deref(),
            _ => None,
        }
    }

    /// Returns `field`'s value safe for display: sensitive values are masked.
    #[must_use]
    pub fn display_value(&self, field: CredentialField) -> Option<String> {
        let value = self.get(field)?;
        if field.is_sensitive() {
            Some(mask::mask(value))
        } else {
            Some(value.to_string())
        }
    }

    /// Returns a copy with every sensitive field masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        match self {
            Self::Aws(c) => Self::Aws(AwsCredential {
                secret_access_key: mask::mask(&c.secret_access_key),
                ..c.clone()
            }),
            Self::Azure(c) => Self::Azure(AzureCredential {
                secret_key: mask::mask(&c.secret_key),
                ..c.clone()
            }),
            Self::Gcp(c) => Self::Gcp(GcpCredential {
                json_text: mask::mask(&c.json_text),
                ..c.clone()
            }),
        }
    }

    /// Returns the required fields of this variant whose value is blank.
    #[must_use]
    pub fn missing_required(&self) -> Vec<CredentialField> {
        fields_required_for(self.provider())
            .iter()
            .copied()
            .filter(|&field| self.get(field).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// Returns a `sha256:<hex>` digest of the sensitive material, for logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let parts = editable_fields(self.provider())
            .iter()
            .filter(|field| field.is_sensitive())
            .map(|&field| self.get(field).unwrap_or_default());
        mask::fingerprint(parts)
    }
}

/// Errors raised when building or editing a credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The field belongs to another provider's credential.
    #[error("field '{field}' does not belong to {provider} credentials")]
    FieldNotInVariant {
        /// The field that was edited.
        field: CredentialField,
        /// The provider of the credential being edited.
        provider: Provider,
    },

    /// No credential field has the given name.
    #[error("unknown credential field '{name}'")]
    UnknownField {
        /// The name that failed to resolve.
        name: Box<str>,
    },

    /// A JSON value did not have the provider's credential shape.
    #[error("credentials do not match the {provider} shape: {source}")]
    Shape {
        /// The provider whose shape was expected.
        provider: Provider,
        /// The underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
}
