
use crate::FileCache;

use std::time::Duration;

use tempfile::TempDir;

pub(crate) fn temp_cache(default_ttl: Option<Duration>) -> (TempDir, FileCache) {
    let temp = TempDir::new().unwrap();
    let cache = FileCache::new(temp.path().join("cache"), default_ttl);
    (temp, cache)
}
