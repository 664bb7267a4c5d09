//! Domain types for deed uploads.

mod date;
mod payload;
mod proptests;
mod record;

pub use date::DeedDate;
pub use payload::{ClearRequest, Deeds, UploadPayload};
pub(crate) use payload::kind_of;
pub use record::{DashboardStats, ExportBundle, MachineSummary, StoredRecord, iso_timestamp};
