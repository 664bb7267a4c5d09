//! deedboard core: shared types, validation, key scheme, and codec.
//!
//! This crate has no internal deedboard dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Upload payload, stored record, and derived views
//! - [`key`]: Storage key layout
//! - [`codec`]: Record encoding and normalize-on-read decoding

#![doc = include_str!("../README.md")]

pub mod codec;
pub mod error;
pub mod key;
pub mod types;

// Re-export key types at crate root for convenience
pub use codec::{decode_record, encode_record, normalize_stored};
pub use error::{Error, Result};
pub use key::KeyScheme;
pub use types::{
    ClearRequest, DashboardStats, DeedDate, Deeds, ExportBundle, MachineSummary, StoredRecord,
    UploadPayload,
};
