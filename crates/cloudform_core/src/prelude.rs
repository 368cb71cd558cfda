//! Convenience re-exports of the most commonly used types.

pub use crate::config::{Config, ConfigError};
pub use crate::credential::{Credential, CredentialError, CredentialField, defaults_for, editable_fields};
pub use crate::error::CloudformError;
pub use crate::form::{CloudForm, FieldErrors, FieldKey, FormConfig, FormError, FormMode, FormStatus, LoadOutcome, SubmitError};
pub use crate::provider::{CredentialType, Provider};
pub use crate::record::{CloudRecord, CloudRecordPayload, EventSource};
pub use crate::schedule::{Frequency, ScheduleScanSetting, Weekday};
pub use crate::store::{RecordLookup, RecordSink, SaveReceipt};
