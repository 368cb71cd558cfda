//! Collaborator contracts for loading and saving records.
//!
//! The form never performs I/O itself. Edit-mode drafts come from a
//! [`RecordLookup`] and submitted payloads go to a [`RecordSink`]; both are
//! injected when the form is built.

use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::record::{CloudRecord, CloudRecordPayload};

/// A pinned, boxed, `Send` future used as the return type for collaborator calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors raised by a [`RecordLookup`].
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The backing store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The stored record was malformed.
    #[error("record '{id}' is malformed: {source}")]
    Malformed {
        /// Identifier of the malformed record.
        id: String,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a [`RecordSink`].
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink refused the payload.
    #[error("save rejected: {0}")]
    Rejected(String),

    /// The payload could not be written.
    #[error("failed to write payload: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Acknowledgement returned by a [`RecordSink`] after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    /// Identifier of the saved record, if the sink assigned or echoed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `true` for updates, `false` for creates.
    pub updated: bool,
    /// ISO 8601 timestamp of when the save completed.
    pub saved_at: Box<str>,
}

impl SaveReceipt {
    /// Creates a receipt for `payload` stamped with the current time.
    #[must_use]
    pub fn for_payload(payload: &CloudRecordPayload) -> Self {
        Self {
            id: payload.record().id().map(str::to_string),
            updated: payload.is_update(),
            saved_at: current_timestamp(),
        }
    }
}

fn current_timestamp() -> Box<str> {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
        .into_boxed_str()
}

/// Resolves record identifiers to stored records.
pub trait RecordLookup: Send + Sync {
    /// Looks up `id`, returning `Ok(None)` when no such record exists.
    fn lookup<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<CloudRecord>, LookupError>>;
}

/// Accepts validated payloads.
pub trait RecordSink: Send + Sync {
    /// Persists or forwards `payload`.
    fn save<'a>(&'a self, payload: &'a CloudRecordPayload) -> BoxFuture<'a, Result<SaveReceipt, SinkError>>;
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn lookup<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<CloudRecord>, LookupError>> {
        (**self).lookup(id)
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &T {
    fn save<'a>(&'a self, payload: &'a CloudRecordPayload) -> BoxFuture<'a, Result<SaveReceipt, SinkError>> {
        (**self).save(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    #[test]
    fn receipt_reflects_payload_mode() {
        let payload = CloudRecordPayload::new(CloudRecord::new(Provider::Aws, "global"));
        let receipt = SaveReceipt::for_payload(&payload);
        assert!(!receipt.updated);
        assert!(receipt.id.is_none());
        assert!(receipt.saved_at.ends_with('Z'));
    }

    #[test]
    fn receipt_serialises_camel_case() {
        let receipt = SaveReceipt {
            id: Some("cloud-001".into()),
            updated: true,
            saved_at: "2024-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["savedAt"], "2024-01-01T00:00:00Z");
        assert_eq!(value["id"], "cloud-001");
    }

    #[test]
    fn lookup_error_names_the_record() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LookupError::Malformed {
            id: "cloud-009".into(),
            source,
        };
        assert!(err.to_string().contains("cloud-009"));
    }
}
