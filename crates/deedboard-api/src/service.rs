//! Upload, aggregation, export, and clear over a [`KvStore`].
//!
//! Every operation is a short sequence of independent store calls: no
//! transactions, no locks, no retries. Reads and deletes for a date are
//! issued concurrently and settle before results are assembled. Keys
//! added or removed between the listing and the reads are not reconciled.

use std::sync::Arc;

use chrono::Utc;
use deedboard_core::{
    ClearRequest, DashboardStats, DeedDate, ExportBundle, KeyScheme, StoredRecord, UploadPayload,
    decode_record, encode_record, normalize_stored,
};
use deedboard_store::KvStore;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

// ============================================================================
// Policy and outcomes
// ============================================================================

/// What read paths do when listing a date's keys fails.
///
/// Applies to both the dashboard and export. Clearing always fails loud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPolicy {
    /// Answer with an empty result flagged `degraded: true`.
    #[default]
    Degrade,
    /// Propagate the store error (500).
    Strict,
}

/// Identifier of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// The storage key written
    pub id: String,
}

/// Outcome of clearing a date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Keys whose delete succeeded
    pub deleted: usize,
    /// Keys whose delete failed; they may still be present
    pub failed_keys: Vec<String>,
}

impl ClearReport {
    /// Whether every delete succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed_keys.is_empty()
    }
}

// ============================================================================
// DeedService
// ============================================================================

/// The deed operations, over an injected store.
pub struct DeedService {
    store: Arc<dyn KvStore>,
    keys: KeyScheme,
    policy: ListingPolicy,
}

impl DeedService {
    /// Create a service with the default key namespace and listing policy.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            keys: KeyScheme::default(),
            policy: ListingPolicy::default(),
        }
    }

    /// Use a different key layout.
    pub fn with_key_scheme(mut self, keys: KeyScheme) -> Self {
        self.keys = keys;
        self
    }

    /// Use a different listing-failure policy.
    pub fn with_listing_policy(mut self, policy: ListingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active listing-failure policy.
    pub fn listing_policy(&self) -> ListingPolicy {
        self.policy
    }

    /// Validate and store one machine's upload, replacing any earlier one
    /// for the same date and machine.
    pub async fn upload(&self, body: Value) -> Result<UploadReceipt> {
        let payload = UploadPayload::from_value(body)?;
        let key = self.keys.record_key(&payload.date, &payload.machine_id);
        let record = StoredRecord::from_payload(payload, Utc::now());
        let encoded = encode_record(&record)?;

        self.store.set(&key, &encoded).await?;
        tracing::info!(
            key = %key,
            operator = %record.operator,
            deeds = record.deed_count(),
            "stored upload"
        );
        Ok(UploadReceipt { id: key })
    }

    /// Summarize every upload for a date.
    pub async fn dashboard(&self, date: &DeedDate) -> Result<DashboardStats> {
        let Some(keys) = self.list(date).await? else {
            return Ok(DashboardStats::degraded(date.clone()));
        };
        let (values, mut skipped) = self.read_all(&keys).await;

        let mut records: Vec<StoredRecord> = Vec::with_capacity(values.len());
        for (key, value) in keys.iter().zip(values) {
            let Some(value) = value else { continue };
            match decode_record(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(key = %key, error = %e, "skipping undecodable record");
                }
            }
        }
        Ok(DashboardStats::fold(date.clone(), &records, skipped))
    }

    /// Collect every upload for a date, verbatim.
    ///
    /// Records are only parsed, never reshaped, so fields this service
    /// does not know about survive.
    pub async fn export(&self, date: &DeedDate) -> Result<ExportBundle> {
        let Some(keys) = self.list(date).await? else {
            return Ok(ExportBundle::degraded(date.clone(), Utc::now()));
        };
        let (values, skipped) = self.read_all(&keys).await;
        let data = values.into_iter().flatten().collect();
        Ok(ExportBundle::new(date.clone(), data, skipped, Utc::now()))
    }

    /// Validate a clear request body and remove that date's uploads.
    pub async fn clear_from_body(&self, body: Value) -> Result<ClearReport> {
        let request = ClearRequest::from_value(body)?;
        self.clear(&request.date).await
    }

    /// Remove every upload for a date.
    ///
    /// Deletes are independent; all are attempted and failures are
    /// reported per key rather than aborting the rest.
    pub async fn clear(&self, date: &DeedDate) -> Result<ClearReport> {
        let keys = self.store.keys(&self.keys.date_pattern(date)).await?;
        if keys.is_empty() {
            tracing::debug!(date = %date, "nothing to clear");
            return Ok(ClearReport::default());
        }

        let deletes = keys.iter().map(|key| async move {
            let outcome = self.store.delete(key).await;
            (key, outcome)
        });

        let mut report = ClearReport::default();
        for (key, outcome) in join_all(deletes).await {
            match outcome {
                Ok(_) => report.deleted += 1,
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "delete failed");
                    report.failed_keys.push(key.clone());
                }
            }
        }
        tracing::info!(
            date = %date,
            deleted = report.deleted,
            failed = report.failed_keys.len(),
            "cleared date"
        );
        Ok(report)
    }

    /// Lists a date's keys. `None` means listing failed and the degrade
    /// policy is in effect.
    async fn list(&self, date: &DeedDate) -> Result<Option<Vec<String>>> {
        let pattern = self.keys.date_pattern(date);
        match self.store.keys(&pattern).await {
            Ok(keys) => Ok(Some(keys)),
            Err(e) if self.policy == ListingPolicy::Degrade => {
                tracing::error!(
                    pattern = %pattern,
                    backend = self.store.backend(),
                    error = %e,
                    "listing failed; answering with an empty result"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads and parses stored values concurrently.
    ///
    /// The result lines up with `keys`: `None` marks a key that could not
    /// be used. Read and parse failures are counted in the second element;
    /// keys that vanished since listing are dropped without counting.
    async fn read_all(&self, keys: &[String]) -> (Vec<Option<Value>>, usize) {
        let reads = keys.iter().map(|key| async move {
            let outcome = self.store.get(key).await;
            (key, outcome)
        });

        let mut values = Vec::with_capacity(keys.len());
        let mut skipped = 0;
        for (key, outcome) in join_all(reads).await {
            let value = match outcome {
                Ok(Some(raw)) => match normalize_stored(raw) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        skipped += 1;
                        tracing::warn!(key = %key, error = %e, "skipping unparsable record");
                        None
                    }
                },
                Ok(None) => {
                    tracing::debug!(key = %key, "record removed after listing");
                    None
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(key = %key, error = %e, "skipping unreadable record");
                    None
                }
            };
            values.push(value);
        }
        (values, skipped)
    }
}
