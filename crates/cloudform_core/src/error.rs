use thiserror::Error;

use crate::config::ConfigError;
use crate::form::{FormError, LoadError, SubmitError};
use crate::record::RecordError;

/// Top-level error type for the cloud connection form.
///
/// Unifies configuration, record decoding, load, transition and submission
/// errors into a single type for callers that drive the whole workflow.
#[derive(Debug, Error)]
pub enum CloudformError {
    /// Configuration could not be read, parsed, or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A record's wire form was inconsistent.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// An edit-mode load failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A form transition was rejected.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Submission failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}
