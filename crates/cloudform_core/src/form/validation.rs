//! Submission-time validation of a draft.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::credential::CredentialField;
use crate::provider::Provider;
use crate::record::CloudRecord;

/// Key of a per-field validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// The record name.
    Name,
    /// The selected regions.
    RegionList,
    /// A credential field.
    Credential(CredentialField),
}

impl FieldKey {
    /// Returns the wire name of the field (e.g. `"regionList"`, `"accessKeyId"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RegionList => "regionList",
            Self::Credential(field) => field.as_str(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<CredentialField> for FieldKey {
    fn from(field: CredentialField) -> Self {
        Self::Credential(field)
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required value was blank.
    #[error("{label} is required")]
    Required {
        /// Human-readable label of the field.
        label: &'static str,
    },

    /// No region was selected.
    #[error("select at least one region")]
    NoRegion,

    /// The service account key was not a JSON object.
    #[error("Service Account JSON must be a JSON object: {reason}")]
    MalformedKey {
        /// Why parsing failed.
        reason: String,
    },

    /// The service account key declared a different credential type.
    #[error("Service Account JSON has type '{found}', expected 'service_account'")]
    NotServiceAccount {
        /// The `type` member found in the key.
        found: String,
    },
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-field validation errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<FieldKey, ValidationError>,
}

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error recorded for `key`.
    #[must_use]
    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&ValidationError> {
        self.errors.get(&key.into())
    }

    /// Returns `true` if `key` has an error.
    #[must_use]
    pub fn contains(&self, key: impl Into<FieldKey>) -> bool {
        self.errors.contains_key(&key.into())
    }

    /// Returns the field keys with errors, in a stable order.
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.errors.keys().copied()
    }

    /// Iterates over `(field, error)` pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &ValidationError)> {
        self.errors.iter().map(|(&key, error)| (key, error))
    }

    pub(crate) fn insert(&mut self, key: impl Into<FieldKey>, error: ValidationError) {
        self.errors.insert(key.into(), error);
    }

    pub(crate) fn remove(&mut self, key: impl Into<FieldKey>) {
        self.errors.remove(&key.into());
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }

    pub(crate) fn clear_credentials(&mut self) {
        self.errors.retain(|key, _| !matches!(key, FieldKey::Credential(_)));
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {error}")?;
        }
        Ok(())
    }
}

/// Validates `record`, collecting every error rather than stopping at the first.
#[must_use]
pub fn validate(record: &CloudRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.name().trim().is_empty() {
        errors.insert(FieldKey::Name, ValidationError::Required { label: "Name" });
    }

    if record.regions().is_empty() {
        errors.insert(FieldKey::RegionList, ValidationError::NoRegion);
    }

    let credentials = record.credentials();
    for field in credentials.missing_required() {
        errors.insert(field, ValidationError::Required { label: field.label() });
    }

    if record.provider() == Provider::Gcp {
        let field = CredentialField::JsonText;
        let key = credentials.get(field).filter(|text| !text.trim().is_empty());
        if let Some(Err(error)) = key.map(check_service_account_key) {
            errors.insert(field, error);
        }
    }

    errors
}

fn check_service_account_key(text: &str) -> Result<(), ValidationError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ValidationError::MalformedKey {
        reason: e.to_string(),
    })?;

    let Some(object) = value.as_object() else {
        return Err(ValidationError::MalformedKey {
            reason: "expected an object".into(),
        });
    };

    match object.get("type") {
        None => Ok(()),
        Some(serde_json::Value::String(kind)) if kind == "service_account" => Ok(()),
        Some(other) => Err(ValidationError::NotServiceAccount {
            found: other.as_str().map_or_else(|| other.to_string(), str::to_string),
        }),
    }
}
