use serde::{Deserialize, Serialize};

/// On-disk representation of one cached value
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CacheEntry {
    /// Original key, kept for debugging; lookups go through the file name
    pub key: String,
    /// Unix milliseconds; `None` never expires
    pub expires_at: Option<i64>,
    pub value: serde_json::Value,
}

impl CacheEntry {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| now_ms >= expires_at)
    }
}
