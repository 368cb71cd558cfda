//! In-memory record dataset with simulated lookup latency.

use std::collections::HashSet;
use std::time::Duration;

use cloudform_core::CloudRecord;
use cloudform_core::store::{BoxFuture, LookupError, RecordLookup};
use sha2::{Digest, Sha256};
#[cfg(feature = "tracing")]
use tracing::trace;

/// Records shipped with the binary.
const SEED: &str = include_str!("data/clouds.json");

const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(500);

/// Errors raised while building a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset was not a JSON array.
    #[error("dataset is not a JSON array of records: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A record in the dataset was inconsistent.
    #[error("record #{index} is invalid: {source}")]
    Record {
        /// Zero-based position of the record.
        index: usize,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A record had no identifier.
    #[error("record #{index} has no id")]
    MissingId {
        /// Zero-based position of the record.
        index: usize,
    },

    /// Two records shared an identifier.
    #[error("duplicate record id '{0}'")]
    DuplicateId(String),
}

/// A read-only set of records that answers lookups after a delay.
///
/// The delay for an id is derived from a SHA-256 digest of the id, so it is
/// stable across runs and never exceeds the configured maximum.
#[derive(Debug, Clone)]
pub struct MockDataset {
    records: Vec<CloudRecord>,
    max_latency: Duration,
}

impl MockDataset {
    /// Loads the dataset shipped with the crate.
    pub fn seeded() -> Result<Self, DatasetError> {
        Self::from_json(SEED)
    }

    /// Parses a dataset from a JSON array of records.
    ///
    /// Every record must carry a unique `id`.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(values.len());

        for (index, value) in values.into_iter().enumerate() {
            let record: CloudRecord =
                serde_json::from_value(value).map_err(|source| DatasetError::Record { index, source })?;
            let id = record.id().ok_or(DatasetError::MissingId { index })?;
            if !seen.insert(id.to_string()) {
                return Err(DatasetError::DuplicateId(id.to_string()));
            }
            records.push(record);
        }

        Ok(Self {
            records,
            max_latency: DEFAULT_MAX_LATENCY,
        })
    }

    /// Sets the upper bound on simulated latency. Zero disables the delay.
    #[must_use]
    pub const fn with_max_latency(mut self, max_latency: Duration) -> Self {
        self.max_latency = max_latency;
        self
    }

    /// Returns every record in dataset order.
    #[must_use]
    pub fn records(&self) -> &[CloudRecord] {
        &self.records
    }

    /// Returns the record with `id`, without any delay.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CloudRecord> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the simulated latency for looking up `id`.
    #[must_use]
    pub fn latency_for(&self, id: &str) -> Duration {
        let max_ms = u64::try_from(self.max_latency.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }

        let digest = Sha256::digest(id.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Duration::from_millis(u64::from_be_bytes(head) % max_ms.saturating_add(1))
    }
}

impl RecordLookup for MockDataset {
    fn lookup<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<CloudRecord>, LookupError>> {
        Box::pin(async move {
            let delay = self.latency_for(id);

            #[cfg(feature = "tracing")]
            trace!(id, delay_ms = delay.as_millis(), "simulated lookup");

            tokio::time::sleep(delay).await;
            Ok(self.get(id).cloned())
        })
    }
}
