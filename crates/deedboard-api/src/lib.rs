//! # deedboard-api
//!
//! HTTP API for deedboard.
//!
//! This crate provides:
//! - [`DeedService`]: upload, per-date aggregation, export, and clear over
//!   an injected [`KvStore`](deedboard_store::KvStore)
//! - [`routes::router`]: the axum route table
//! - [`Server`]: listener bootstrap with graceful shutdown
//! - [`Error`]: request errors and their HTTP mapping

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod service;

pub use error::{Error, Result};
pub use server::{AppState, DEFAULT_MAX_BODY_BYTES, Server, ServerConfig};
pub use service::{ClearReport, DeedService, ListingPolicy, UploadReceipt};
