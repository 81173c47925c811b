//! File-backed key/value cache with per-entry TTL.
//!
//! Each key lives in its own JSON file named after the SHA-256 of the key.
//! The cache is advisory: callers must behave correctly on a miss, and
//! [`FileCache::remember`] degrades to calling the producer when the disk
//! misbehaves.

mod cache_entry;
mod error;
mod file_cache;

pub use error::{CacheError, Result};
pub use file_cache::FileCache;

#[cfg(test)]
mod tests;
