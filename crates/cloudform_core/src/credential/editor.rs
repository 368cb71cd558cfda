//! Per-field editing of provider credentials.

use super::{Credential, CredentialError, CredentialField};
use crate::provider::Provider;

/// Returns every editable field for `provider`, required fields first.
#[must_use]
pub const fn editable_fields(provider: Provider) -> &'static [CredentialField] {
    match provider {
        Provider::Aws => &[
            CredentialField::AccessKeyId,
            CredentialField::SecretAccessKey,
            CredentialField::RoleArn,
        ],
        Provider::Azure => &[
            CredentialField::TenantId,
            CredentialField::SubscriptionId,
            CredentialField::ApplicationId,
            CredentialField::SecretKey,
        ],
        Provider::Gcp => &[CredentialField::JsonText, CredentialField::ProjectId],
    }
}

impl Credential {
    /// Returns a new credential with `field` set to `value`.
    ///
    /// Required fields keep whatever is entered, blank included. Optional
    /// fields are removed when set to a blank value.
    pub fn with_field(&self, field: CredentialField, value: impl Into<String>) -> Result<Self, CredentialError> {
        let mut next = self.clone();
        next.set_field(field, value.into())?;
        Ok(next)
    }

    fn set_field(&mut self, field: CredentialField, value: String) -> Result<(), CredentialError> {
        let provider = self.provider();
        match (self, field) {
            (Self::Aws(c), CredentialField::AccessKeyId) => c.access_key_id = value,
            (Self::Aws(c), CredentialField::SecretAccessKey) => c.secret_access_key = value,
            (Self::Aws(c), CredentialField::RoleArn) => c.role_arn = non_blank(value),
            (Self::Azure(c), CredentialField::TenantId) => c.tenant_id = value,
            (Self::Azure(c), CredentialField::SubscriptionId) => c.subscription_id = value,
            (Self::Azure(c), CredentialField::ApplicationId) => c.application_id = value,
            (Self::Azure(c), CredentialField::SecretKey) => c.secret_key = value,
            (Self::Gcp(c), CredentialField::JsonText) => c.json_text = value,
            (Self::Gcp(c), CredentialField::ProjectId) => c.project_id = non_blank(value),
            _ => {
                return Err(CredentialError::FieldNotInVariant { field, provider });
            }
        }
        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::defaults_for;

    #[test]
    fn editable_fields_belong_to_their_provider() {
        for provider in Provider::ALL {
            for field in editable_fields(provider) {
                assert_eq!(field.provider(), provider);
            }
        }
    }

    #[test]
    fn editable_fields_cover_every_field_exactly_once() {
        let total: usize = Provider::ALL.iter().map(|&p| editable_fields(p).len()).sum();
        assert_eq!(total, CredentialField::ALL.len());
    }

    #[test]
    fn with_field_updates_only_the_edited_field() {
        let credential = defaults_for(Provider::Azure)
            .with_field(CredentialField::TenantId, "tenant")
            .unwrap();
        assert_eq!(credential.get(CredentialField::TenantId), Some("tenant"));
        assert_eq!(credential.get(CredentialField::SecretKey), Some(""));
    }

    #[test]
    fn with_field_keeps_blank_required_fields_present() {
        let credential = defaults_for(Provider::Aws)
            .with_field(CredentialField::AccessKeyId, "AKIA")
            .unwrap()
            .with_field(CredentialField::AccessKeyId, "")
            .unwrap();
        assert_eq!(credential.get(CredentialField::AccessKeyId), Some(""));
    }

    #[test]
    fn with_field_removes_blank_optional_fields() {
        let credential = defaults_for(Provider::Aws)
            .with_field(CredentialField::RoleArn, "arn:aws:iam::123456789012:role/scanner")
            .unwrap();
        assert!(credential.get(CredentialField::RoleArn).is_some());

        let cleared = credential.with_field(CredentialField::RoleArn, "  ").unwrap();
        assert_eq!(cleared.get(CredentialField::RoleArn), None);
    }

    #[test]
    fn with_field_rejects_foreign_field() {
        let err = defaults_for(Provider::Gcp)
            .with_field(CredentialField::AccessKeyId, "AKIA")
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialError::FieldNotInVariant {
                field: CredentialField::AccessKeyId,
                provider: Provider::Gcp,
            }
        ));
    }

    #[test]
    fn with_field_leaves_original_untouched() {
        let original = defaults_for(Provider::Gcp);
        let _ = original.with_field(CredentialField::JsonText, "{}").unwrap();
        assert_eq!(original.get(CredentialField::JsonText), Some(""));
    }
}
