//! The form state controller.
//!
//! [`CloudForm`] owns the single draft record, the form status and the
//! per-field error map. Every mutation goes through one of its transition
//! methods so the draft's invariants hold between calls:
//!
//! - the credential shape and credential type match the provider,
//! - the mandatory region is always selected,
//! - the schedule carries exactly the fields its frequency requires.
//!
//! Edit-mode loads are tagged with a generation counter. Opening, closing
//! or starting another load bumps the generation, and a result that
//! arrives for an older generation is dropped.

mod validation;

use std::collections::BTreeSet;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

pub use self::validation::{FieldErrors, FieldKey, ValidationError, validate};
use crate::config::Config;
use crate::credential::{self, Credential, CredentialError, CredentialField};
use crate::provider::{CredentialType, Provider};
use crate::record::{CloudRecord, CloudRecordPayload, EventSource};
use crate::schedule::{Frequency, ScheduleError, ScheduleScanSetting};
use crate::store::{LookupError, RecordLookup, RecordSink, SaveReceipt, SinkError};

/// Settings that shape a form: catalogues, mandatory region and load bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Region that can never be deselected.
    pub mandatory_region: String,
    /// Regions that may be added.
    pub regions: BTreeSet<String>,
    /// Cloud groups that may be added.
    pub cloud_groups: BTreeSet<String>,
    /// Upper bound on an edit-mode load.
    pub load_timeout: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for FormConfig {
    fn from(config: &Config) -> Self {
        let mut regions: BTreeSet<String> = config.regions.iter().cloned().collect();
        regions.insert(config.mandatory_region.clone());
        Self {
            mandatory_region: config.mandatory_region.clone(),
            regions,
            cloud_groups: config.cloud_groups.iter().cloned().collect(),
            load_timeout: config.load_timeout(),
        }
    }
}

/// Whether the draft is new or an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    /// A new record; payloads carry no `id`.
    #[default]
    Create,
    /// An existing record; payloads carry this `id`.
    Edit {
        /// Identifier of the record being edited.
        id: String,
    },
}

impl FormMode {
    /// Returns the edited record's identifier, if in edit mode.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(id),
        }
    }
}

/// Lifecycle state of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    /// No draft is open.
    #[default]
    Closed,
    /// An edit-mode load is outstanding; the draft cannot be edited.
    Loading,
    /// A draft is open for editing.
    Ready,
    /// The requested record does not exist; no draft is open.
    NotFound,
    /// The last load failed; the previous draft, if any, is still open.
    LoadFailed,
}

impl FormStatus {
    /// Returns a lowercase label for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::NotFound => "not found",
            Self::LoadFailed => "load failed",
        }
    }
}

/// Handle for one edit-mode load, returned by [`CloudForm::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    id: String,
}

impl LoadTicket {
    /// Returns the identifier being loaded.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Why an edit-mode load produced no record.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The lookup collaborator failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The lookup did not answer in time.
    #[error("loading timed out after {0:?}")]
    TimedOut(Duration),
}

/// Result of applying a load via [`CloudForm::finish_load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// The draft was replaced by the loaded record.
    Loaded,
    /// No record has the requested id; the draft was closed.
    NotFound,
    /// The load failed; the prior draft was kept.
    Failed(LoadError),
    /// A newer open, close or load superseded this one; nothing changed.
    Stale,
}

/// Errors raised by form transitions.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// No draft is open.
    #[error("no draft is open")]
    NoDraft,

    /// A load is outstanding.
    #[error("the form is still loading")]
    Loading,

    /// The credential type is not offered by the draft's provider.
    #[error("credential type {credential_type} is not valid for {provider}")]
    IllegalCredentialType {
        /// The draft's provider.
        provider: Provider,
        /// The rejected credential type.
        credential_type: CredentialType,
    },

    /// A whole credential of another provider was supplied.
    #[error("{found} credentials cannot be used for a {expected} record")]
    ProviderMismatch {
        /// The draft's provider.
        expected: Provider,
        /// The provider of the supplied credential.
        found: Provider,
    },

    /// The region is not in the configured catalogue.
    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    /// The cloud group is not in the configured catalogue.
    #[error("unknown cloud group '{0}'")]
    UnknownGroup(String),

    /// A schedule field was edited while scheduled scanning is disabled.
    #[error("scheduled scanning is disabled")]
    ScheduleDisabled,

    /// A credential edit was rejected.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A schedule edit was rejected.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Errors raised by [`CloudForm::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form was not in a submittable state.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The draft failed validation; the errors are also recorded on the form.
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),

    /// The sink failed; the draft is still open.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Form state controller for one cloud connection dialog.
#[derive(Debug)]
pub struct CloudForm<L, S> {
    lookup: L,
    sink: S,
    config: FormConfig,
    draft: Option<CloudRecord>,
    mode: FormMode,
    status: FormStatus,
    errors: FieldErrors,
    generation: u64,
}

impl<L: RecordLookup, S: RecordSink> CloudForm<L, S> {
    /// Creates a closed form backed by `lookup` and `sink`.
    #[must_use]
    pub fn new(lookup: L, sink: S, config: FormConfig) -> Self {
        Self {
            lookup,
            sink,
            config,
            draft: None,
            mode: FormMode::Create,
            status: FormStatus::Closed,
            errors: FieldErrors::new(),
            generation: 0,
        }
    }

    /// Returns the form's configuration.
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns the open draft.
    #[must_use]
    pub const fn draft(&self) -> Option<&CloudRecord> {
        self.draft.as_ref()
    }

    /// Returns the errors recorded by the last submission, minus those
    /// cleared by later edits.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Opens a blank AWS draft in create mode.
    pub fn init_create(&mut self) {
        self.generation += 1;
        self.draft = Some(CloudRecord::new(Provider::Aws, &self.config.mandatory_region));
        self.mode = FormMode::Create;
        self.status = FormStatus::Ready;
        self.errors.clear();
    }

    /// Discards the draft and any outstanding load.
    pub fn close(&mut self) {
        self.generation += 1;
        self.draft = None;
        self.mode = FormMode::Create;
        self.status = FormStatus::Closed;
        self.errors.clear();
    }

    /// Loads record `id` for editing, bounded by the configured timeout.
    pub async fn load_for_edit(&mut self, id: &str) -> LoadOutcome {
        let ticket = self.begin_load(id);
        let timeout = self.config.load_timeout;
        let result = match tokio::time::timeout(timeout, self.lookup.lookup(id)).await {
            Ok(result) => result.map_err(LoadError::from),
            Err(_) => Err(LoadError::TimedOut(timeout)),
        };
        self.finish_load(ticket, result)
    }

    /// Starts an edit-mode load and enters the loading state.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, id: &str) -> LoadTicket {
        self.generation += 1;
        self.status = FormStatus::Loading;

        #[cfg(feature = "tracing")]
        debug!(id, generation = self.generation, "loading record");

        LoadTicket {
            generation: self.generation,
            id: id.to_string(),
        }
    }

    /// Applies the result of the load started by `ticket`.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Option<CloudRecord>, LoadError>) -> LoadOutcome {
        if ticket.generation != self.generation {
            #[cfg(feature = "tracing")]
            debug!(id = %ticket.id, generation = ticket.generation, "dropping stale load");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(Some(mut record)) => {
                if record.region_list.insert(self.config.mandatory_region.clone()) {
                    #[cfg(feature = "tracing")]
                    warn!(id = %ticket.id, region = %self.config.mandatory_region, "restored mandatory region");
                }
                record.id = Some(ticket.id.clone());
                self.draft = Some(record);
                self.mode = FormMode::Edit { id: ticket.id };
                self.status = FormStatus::Ready;
                self.errors.clear();
                LoadOutcome::Loaded
            }
            Ok(None) => {
                self.draft = None;
                self.mode = FormMode::Create;
                self.status = FormStatus::NotFound;
                self.errors.clear();
                LoadOutcome::NotFound
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                warn!(id = %ticket.id, %error, "load failed");
                self.status = FormStatus::LoadFailed;
                LoadOutcome::Failed(error)
            }
        }
    }

    fn draft_mut(&mut self) -> Result<&mut CloudRecord, FormError> {
        if self.status == FormStatus::Loading {
            return Err(FormError::Loading);
        }
        self.draft.as_mut().ok_or(FormError::NoDraft)
    }

    /// Switches provider, replacing the credentials and credential type with
    /// the provider's defaults and clearing the event source.
    pub fn set_provider(&mut self, provider: Provider) -> Result<(), FormError> {
        let draft = self.draft_mut()?;
        draft.credentials = credential::defaults_for(provider);
        draft.credential_type = provider.default_credential_type();
        draft.event_source = None;
        self.errors.clear_credentials();
        Ok(())
    }

    /// Sets the record name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FormError> {
        self.draft_mut()?.name = name.into();
        self.errors.remove(FieldKey::Name);
        Ok(())
    }

    /// Adds or removes a cloud group.
    ///
    /// Only groups in the catalogue can be added. Returns `true` once toggled.
    pub fn toggle_group(&mut self, name: &str) -> Result<bool, FormError> {
        let known = self.config.cloud_groups.contains(name);
        let groups = &mut self.draft_mut()?.cloud_group_name;
        if groups.remove(name) {
            return Ok(true);
        }
        if !known {
            return Err(FormError::UnknownGroup(name.to_string()));
        }
        groups.insert(name.to_string());
        Ok(true)
    }

    /// Adds or removes a region.
    ///
    /// Toggling the mandatory region does nothing and returns `false`. Only
    /// regions in the catalogue can be added.
    pub fn toggle_region(&mut self, name: &str) -> Result<bool, FormError> {
        let mandatory = self.config.mandatory_region == name;
        let known = self.config.regions.contains(name);
        let regions = &mut self.draft_mut()?.region_list;
        if mandatory {
            return Ok(false);
        }
        if !regions.remove(name) {
            if !known {
                return Err(FormError::UnknownRegion(name.to_string()));
            }
            regions.insert(name.to_string());
        }
        self.errors.remove(FieldKey::RegionList);
        Ok(true)
    }

    /// Replaces the whole credential and clears every credential error.
    pub fn update_credential(&mut self, value: Credential) -> Result<(), FormError> {
        let draft = self.draft_mut()?;
        let expected = draft.provider();
        if value.provider() != expected {
            return Err(FormError::ProviderMismatch {
                expected,
                found: value.provider(),
            });
        }
        draft.credentials = value;
        self.errors.clear_credentials();
        Ok(())
    }

    /// Sets one credential field and clears that field's error.
    pub fn edit_credential_field(&mut self, field: CredentialField, value: impl Into<String>) -> Result<(), FormError> {
        let draft = self.draft_mut()?;
        draft.credentials = draft.credentials.with_field(field, value)?;
        self.errors.remove(field);
        Ok(())
    }

    /// Sets the credential type, which must be legal for the provider.
    pub fn set_credential_type(&mut self, credential_type: CredentialType) -> Result<(), FormError> {
        let draft = self.draft_mut()?;
        let provider = draft.provider();
        if !credential_type.is_legal_for(provider) {
            return Err(FormError::IllegalCredentialType {
                provider,
                credential_type,
            });
        }
        draft.credential_type = credential_type;
        Ok(())
    }

    /// Sets the event source name; a blank name removes it.
    pub fn set_event_source(&mut self, name: &str) -> Result<(), FormError> {
        let draft = self.draft_mut()?;
        let provider = draft.provider();
        let name = name.trim();
        draft.event_source = (!name.is_empty()).then(|| EventSource::new(provider, name));
        Ok(())
    }

    /// Sets the proxy URL; a blank URL removes it.
    pub fn set_proxy_url(&mut self, url: &str) -> Result<(), FormError> {
        let url = url.trim();
        self.draft_mut()?.proxy_url = (!url.is_empty()).then(|| url.to_string());
        Ok(())
    }

    /// Enables or disables cloud event processing.
    pub fn set_event_process_enabled(&mut self, enabled: bool) -> Result<(), FormError> {
        self.draft_mut()?.event_process_enabled = enabled;
        Ok(())
    }

    /// Enables or disables user activity collection.
    pub fn set_user_activity_enabled(&mut self, enabled: bool) -> Result<(), FormError> {
        self.draft_mut()?.user_activity_enabled = enabled;
        Ok(())
    }

    /// Enables scheduled scanning with a daily 12:00 schedule, or disables it
    /// and drops the schedule. Enabling an enabled schedule keeps it.
    pub fn set_schedule_enabled(&mut self, enabled: bool) -> Result<(), FormError> {
        let schedule = &mut self.draft_mut()?.schedule_scan_setting;
        if !enabled {
            *schedule = None;
        } else if schedule.is_none() {
            *schedule = Some(ScheduleScanSetting::default());
        }
        Ok(())
    }

    fn schedule_mut(&mut self) -> Result<&mut ScheduleScanSetting, FormError> {
        self.draft_mut()?
            .schedule_scan_setting
            .as_mut()
            .ok_or(FormError::ScheduleDisabled)
    }

    /// Switches the schedule frequency, resetting it to that frequency's defaults.
    ///
    /// Selecting the current frequency keeps the schedule as it is.
    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<(), FormError> {
        let schedule = self.schedule_mut()?;
        *schedule = schedule.with_frequency(frequency);
        Ok(())
    }

    /// Sets the schedule hour from its string form.
    pub fn set_schedule_hour(&mut self, value: &str) -> Result<(), FormError> {
        self.schedule_mut()?.set_hour(value).map_err(FormError::from)
    }

    /// Sets the schedule minute from its string form.
    pub fn set_schedule_minute(&mut self, value: &str) -> Result<(), FormError> {
        self.schedule_mut()?.set_minute(value).map_err(FormError::from)
    }

    /// Sets the schedule day of month from its string form.
    pub fn set_schedule_date(&mut self, value: &str) -> Result<(), FormError> {
        self.schedule_mut()?.set_date(value).map_err(FormError::from)
    }

    /// Sets the schedule weekday from its code or name.
    pub fn set_schedule_weekday(&mut self, value: &str) -> Result<(), FormError> {
        self.schedule_mut()?.set_weekday(value).map_err(FormError::from)
    }

    /// Validates the open draft without recording the errors.
    ///
    /// Returns no errors when no draft is open.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        self.draft.as_ref().map(validate).unwrap_or_default()
    }

    /// Builds the canonical payload for the open draft.
    ///
    /// The `id` comes from the mode, the name is trimmed and a blank proxy
    /// URL is dropped. The draft is not validated.
    pub fn payload(&self) -> Result<CloudRecordPayload, FormError> {
        if self.status == FormStatus::Loading {
            return Err(FormError::Loading);
        }
        let mut record = self.draft.clone().ok_or(FormError::NoDraft)?;
        record.id = self.mode.id().map(str::to_string);
        record.name = record.name.trim().to_string();
        record.proxy_url = record.proxy_url.filter(|url| !url.trim().is_empty());
        Ok(CloudRecordPayload::new(record))
    }

    /// Validates the draft and hands its payload to the sink.
    ///
    /// On validation failure the errors are recorded and the sink is not
    /// called. On sink failure the draft stays open. On success the form
    /// closes.
    pub async fn submit(&mut self) -> Result<SaveReceipt, SubmitError> {
        let payload = self.payload()?;

        let errors = validate(payload.record());
        if !errors.is_empty() {
            #[cfg(feature = "tracing")]
            debug!(count = errors.len(), "draft failed validation");
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        #[cfg(feature = "tracing")]
        debug!(
            update = payload.is_update(),
            credentials = %payload.record().credentials().fingerprint(),
            "submitting"
        );

        let receipt = self.sink.save(&payload).await?;
        self.close();
        Ok(receipt)
    }
}
