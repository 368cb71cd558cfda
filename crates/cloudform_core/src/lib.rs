//! Provider-polymorphic form engine for cloud connection records.
//!
//! A cloud connection record describes how to reach one AWS, Azure or GCP
//! account: its credentials, regions, event source and scan schedule. This
//! crate owns the rules for editing such a record as a single draft and
//! turning it into a validated payload. Loading and saving are delegated to
//! injected collaborators so the engine performs no I/O of its own.
//!
//! # Main Types
//!
//! - [`CloudForm`] - Owns the draft and applies every state transition
//! - [`CloudRecord`] - A cloud connection record and its JSON wire format
//! - [`Credential`] - Provider-shaped credentials with masking for display
//! - [`ScheduleScanSetting`] - A scan schedule with one variant per frequency
//! - [`Config`] - User configuration loaded from `.cloudform.toml`
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors that library
//! consumers can match on:
//!
//! - [`FormError`] - Rejected form transitions
//! - [`SubmitError`] - Validation, state or sink failures on submission
//! - [`ConfigError`] - Configuration loading/parsing failures
//! - [`CloudformError`] - Top-level error enum combining the above
//!
//! Validation failures are not errors in this sense: they are collected per
//! field into [`FieldErrors`] and kept on the form until the field is edited.
//!
//! The CLI crate (`cloudform_cli`) uses `anyhow` for error propagation.

/// User configuration loaded from `.cloudform.toml`.
pub mod config;
/// Provider-specific credential shapes, editing and masking.
pub mod credential;
/// Top-level error type.
pub mod error;
/// The form state controller and draft validation.
pub mod form;
/// Filesystem helpers for atomic writes.
pub mod fs_util;
/// Common re-exports for internal use.
pub mod prelude;
/// Cloud providers and their credential types.
pub mod provider;
/// The cloud connection record and its wire format.
pub mod record;
/// Recurring scan schedules.
pub mod schedule;
/// Collaborator contracts for loading and saving records.
pub mod store;

pub use config::{Config, ConfigError};
pub use credential::{Credential, CredentialError, CredentialField, defaults_for, editable_fields, fields_required_for};
pub use error::CloudformError;
pub use form::{
    CloudForm, FieldErrors, FieldKey, FormConfig, FormError, FormMode, FormStatus, LoadError, LoadOutcome, LoadTicket,
    SubmitError, ValidationError, validate,
};
pub use provider::{CredentialType, ParseProviderError, Provider};
pub use record::{CloudRecord, CloudRecordPayload, EventSource, RecordError};
pub use schedule::{DayOfMonth, Frequency, Hour, Minute, ScheduleError, ScheduleField, ScheduleScanSetting, Weekday};
pub use store::{BoxFuture, LookupError, RecordLookup, RecordSink, SaveReceipt, SinkError};

/// Default filename for cloudform configuration.
pub const CONFIG_FILENAME: &str = ".cloudform.toml";
