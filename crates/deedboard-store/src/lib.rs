//! # deedboard-store
//!
//! Key-value store abstraction for deedboard.
//!
//! This crate provides:
//! - [`KvStore`]: the `get` / `set` / `keys` / `delete` contract
//! - [`RedisStore`]: Redis backend (lazy connection, no retries)
//! - [`MemoryStore`]: in-memory backend with fault injection, for tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod redis_store;
pub mod traits;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use traits::KvStore;
