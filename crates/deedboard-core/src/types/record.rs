//! Persisted record and the views derived from it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::{DeedDate, Deeds, UploadPayload};

// ============================================================================
// StoredRecord
// ============================================================================

/// What is persisted under `deeds:<date>:<machine_id>`.
///
/// One record per (date, machine); a later upload replaces it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Submitting machine
    pub machine_id: String,
    /// Operator running the machine
    pub operator: String,
    /// Server receipt time, ISO-8601 UTC
    pub upload_time: String,
    /// Deed id to opaque deed value
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deeds: Deeds,
}

impl StoredRecord {
    /// Builds the record for a validated upload received at `now`.
    pub fn from_payload(payload: UploadPayload, now: DateTime<Utc>) -> Self {
        Self {
            machine_id: payload.machine_id,
            operator: payload.operator,
            upload_time: iso_timestamp(now),
            deeds: payload.deeds,
        }
    }

    /// Number of deeds in the record.
    pub fn deed_count(&self) -> usize {
        self.deeds.len()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Deeds, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Deeds>::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats a timestamp as `2024-01-01T12:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Derived views
// ============================================================================

/// Per-machine line of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSummary {
    /// Submitting machine
    pub machine_id: String,
    /// Operator running the machine
    pub operator: String,
    /// Number of deeds in the machine's upload
    pub deed_count: usize,
    /// When the upload was received
    pub upload_time: String,
}

impl From<&StoredRecord> for MachineSummary {
    fn from(record: &StoredRecord) -> Self {
        Self {
            machine_id: record.machine_id.clone(),
            operator: record.operator.clone(),
            deed_count: record.deed_count(),
            upload_time: record.upload_time.clone(),
        }
    }
}

/// Dashboard summary for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Date summarized
    pub date: DeedDate,
    /// Sum of `deed_count` over `machines`
    pub total_deeds: usize,
    /// One entry per readable record, in listing order
    pub machines: Vec<MachineSummary>,
    /// Records that were listed but could not be read or decoded
    pub skipped_records: usize,
    /// Listing failed and an empty result was substituted
    pub degraded: bool,
}

impl DashboardStats {
    /// Folds readable records into a summary, preserving their order.
    pub fn fold(date: DeedDate, records: &[StoredRecord], skipped_records: usize) -> Self {
        let machines: Vec<MachineSummary> = records.iter().map(MachineSummary::from).collect();
        let total_deeds = machines.iter().map(|m| m.deed_count).sum();
        Self {
            date,
            total_deeds,
            machines,
            skipped_records,
            degraded: false,
        }
    }

    /// An empty summary used when listing failed under the degrade policy.
    pub fn degraded(date: DeedDate) -> Self {
        Self {
            degraded: true,
            ..Self::fold(date, &[], 0)
        }
    }
}

/// Downloadable bundle of every record for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// Date exported
    pub date: DeedDate,
    /// When the export was produced, ISO-8601 UTC
    pub exported_at: String,
    /// Number of records in `data`
    pub total_uploads: usize,
    /// The stored records as read, unknown fields included
    pub data: Vec<Value>,
    /// Records that were listed but could not be read or decoded
    pub skipped_records: usize,
    /// Listing failed and an empty result was substituted
    pub degraded: bool,
}

impl ExportBundle {
    /// Wraps records in a manifest stamped with `now`.
    pub fn new(
        date: DeedDate,
        data: Vec<Value>,
        skipped_records: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            exported_at: iso_timestamp(now),
            total_uploads: data.len(),
            data,
            skipped_records,
            degraded: false,
        }
    }

    /// An empty bundle used when listing failed under the degrade policy.
    pub fn degraded(date: DeedDate, now: DateTime<Utc>) -> Self {
        Self {
            degraded: true,
            ..Self::new(date, Vec::new(), 0, now)
        }
    }

    /// Attachment file name for this bundle.
    pub fn file_name(&self) -> String {
        format!("deeds-{}.json", self.date)
    }
}
