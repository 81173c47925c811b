use crate::cache_entry::CacheEntry;
use crate::{CacheError, Result as CacheErrorResult};

use std::future::Future;
use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

const ENTRY_EXTENSION: &str = "cache";
const TEMP_EXTENSION: &str = "tmp";
/// A temp file this old belongs to a write that never reached its rename.
const STALE_TEMP_AGE: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    default_ttl: Option<Duration>,
}

impl FileCache {
    /// `default_ttl` applies to `set` calls that pass no TTL; `None` keeps
    /// such entries until they are forgotten.
    pub fn new(dir: impl Into<PathBuf>, default_ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            default_ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheErrorResult<Option<T>> {
        let Some(entry) = self.read_live_entry(key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(entry.value) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Stored under a different type; treat as a miss.
                debug!("Cache entry for '{key}' has unexpected shape: {e}");
                Ok(None)
            }
        }
    }

    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> CacheErrorResult<()> {
        let expires_at = ttl.or(self.default_ttl).map(|ttl| {
            let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
            now_ms().saturating_add(ttl_ms)
        });

        let entry = CacheEntry {
            key: key.to_string(),
            expires_at,
            value: serde_json::to_value(value).map_err(|e| CacheError::Serde {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?,
        };

        let content = serde_json::to_vec(&entry).map_err(|e| CacheError::Serde {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        // Write to a sibling file and rename so readers never see half an entry.
        let path = self.entry_path(key);
        let tmp_path = path.with_extension(format!(
            "{}.{TEMP_EXTENSION}",
            uuid::Uuid::new_v4().as_simple()
        ));
        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(io_error(&path, e));
        }

        Ok(())
    }

    pub async fn has(&self, key: &str) -> CacheErrorResult<bool> {
        Ok(self.read_live_entry(key).await?.is_some())
    }

    /// Remove `key`; returns whether an entry existed.
    pub async fn forget(&self, key: &str) -> CacheErrorResult<bool> {
        remove_if_present(&self.entry_path(key)).await
    }

    /// Return the cached value for `key`, or run `producer` and cache its result.
    ///
    /// Cache failures are logged and never surface; only `producer` errors do.
    pub async fn remember<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed, recomputing: {e}"),
        }

        let value = producer().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("Cache write failed: {e}");
        }

        Ok(value)
    }

    /// Delete every entry and leftover temp file. Returns how many entries
    /// were removed.
    pub async fn flush(&self) -> CacheErrorResult<usize> {
        self.sweep(|_| true, Duration::ZERO).await
    }

    /// Delete expired and unreadable entries, plus temp files abandoned by
    /// interrupted writes. Returns how many entries were removed.
    ///
    /// Best-effort: a file that can't be read or removed is logged and skipped.
    pub async fn cleanup_expired(&self) -> CacheErrorResult<usize> {
        let now = now_ms();
        self.sweep(
            move |entry| entry.is_none_or(|entry| entry.is_expired(now)),
            STALE_TEMP_AGE,
        )
        .await
    }

    async fn sweep<F>(&self, should_remove: F, temp_min_age: Duration) -> CacheErrorResult<usize>
    where
        F: Fn(Option<&CacheEntry>) -> bool,
    {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(io_error(&self.dir, e)),
        };

        let mut removed = 0;
        while let Some(file) = dir
            .next_entry()
            .await
            .map_err(|e| io_error(&self.dir, e))?
        {
            let path = file.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(ENTRY_EXTENSION) => {}
                Some(TEMP_EXTENSION) => {
                    if temp_min_age.is_zero() || is_older_than(&path, temp_min_age).await {
                        debug!("Removing abandoned cache temp file {}", path.display());
                        if let Err(e) = remove_if_present(&path).await {
                            warn!("Failed to remove cache temp file: {e}");
                        }
                    }
                    continue;
                }
                _ => continue,
            }

            let entry = match tokio::fs::read(&path).await {
                Ok(bytes) => serde_json::from_slice::<CacheEntry>(&bytes).ok(),
                Err(e) => {
                    warn!("Skipping unreadable cache file {}: {e}", path.display());
                    continue;
                }
            };

            if !should_remove(entry.as_ref()) {
                continue;
            }

            match remove_if_present(&path).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to remove cache file: {e}"),
            }
        }

        Ok(removed)
    }

    /// Read an entry, deleting it if it has expired or cannot be parsed.
    async fn read_live_entry(&self, key: &str) -> CacheErrorResult<Option<CacheEntry>> {
        let path = self.entry_path(key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        let entry = match serde_json::from_slice::<CacheEntry>(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding corrupt cache file {}: {e}", path.display());
                remove_if_present(&path).await?;
                return Ok(None);
            }
        };

        if entry.is_expired(now_ms()) {
            remove_if_present(&path).await?;
            return Ok(None);
        }

        Ok(Some(entry))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        let name: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        self.dir.join(format!("{name}.{ENTRY_EXTENSION}"))
    }
}

async fn remove_if_present(path: &Path) -> CacheErrorResult<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

async fn is_older_than(path: &Path, age: Duration) -> bool {
    tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|metadata| metadata.modified().ok())
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|elapsed| elapsed >= age)
}

#[track_caller]
fn io_error(path: &Path, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.to_path_buf(),
        source,
        location: ErrorLocation::from(Location::caller()),
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
