//! On-disk response cache for listing pages.
//!
//! One JSON file per URL at `<root>/<host>/<sha256(url)>.json`. I/O errors
//! are logged and treated as a miss; the cache never fails a fetch.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::url_model::host_of;

/// Host directory for URLs without a host.
const NO_HOST_DIR: &str = "_";

/// A stored response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub status: u32,
    pub body: String,
    /// Unix seconds.
    pub stored_at: u64,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    root: PathBuf,
    expire_after: Duration,
}

impl ResponseCache {
    pub fn new(root: impl Into<PathBuf>, expire_after: Duration) -> Self {
        Self {
            root: root.into(),
            expire_after,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry file for `url`.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let host = host_of(url)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| NO_HOST_DIR.to_string());
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        self.root.join(host).join(format!("{}.json", digest))
    }

    /// Fresh entry for `url`, if any.
    pub fn get(&self, url: &str) -> Option<CacheEntry> {
        let path = self.entry_path(url);
        let data = match fs::read(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("cache read {}: {}", path.display(), e);
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_slice(&data) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("cache entry {} unreadable: {}", path.display(), e);
                return None;
            }
        };
        if entry.url != url || self.is_expired(&entry) {
            return None;
        }
        Some(entry)
    }

    /// Stores a response. Only 200 responses are kept.
    pub fn put(&self, url: &str, status: u32, body: &str) {
        if status != 200 {
            return;
        }
        let entry = CacheEntry {
            url: url.to_string(),
            status,
            body: body.to_string(),
            stored_at: now_secs(),
        };
        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!("cache write for {}: {}", url, e);
        }
    }

    /// Removes every entry.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn write_entry(&self, entry: &CacheEntry) -> io::Result<()> {
        let path = self.entry_path(&entry.url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(entry).map_err(io::Error::other)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        now_secs().saturating_sub(entry.stored_at) >= self.expire_after.as_secs()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://myrient.erista.me/files/Redump/Nintendo%20-%20GameCube/";

    fn cache(dir: &Path) -> ResponseCache {
        ResponseCache::new(dir, Duration::from_secs(3 * 60 * 60))
    }

    #[test]
    fn entry_path_is_partitioned_by_host() {
        let dir = tempfile::tempdir().unwrap();
        let c = cache(dir.path());
        let p = c.entry_path(URL);
        assert!(p.starts_with(dir.path().join("myrient.erista.me")));
        assert_eq!(p.extension().and_then(|e| e.to_str()), Some("json"));
        assert_ne!(p, c.entry_path("https://myrient.erista.me/files/other/"));
    }

    #[test]
    fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let c = cache(dir.path());
        assert!(c.get(URL).is_none());
        c.put(URL, 200, "<html></html>");
        let e = c.get(URL).unwrap();
        assert_eq!(e.status, 200);
        assert_eq!(e.body, "<html></html>");
    }

    #[test]
    fn non_200_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let c = cache(dir.path());
        c.put(URL, 500, "error");
        c.put(URL, 404, "missing");
        assert!(c.get(URL).is_none());
        assert!(!c.entry_path(URL).exists());
    }

    #[test]
    fn expired_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let c = ResponseCache::new(dir.path(), Duration::from_secs(60));
        let stale = CacheEntry {
            url: URL.to_string(),
            status: 200,
            body: "old".to_string(),
            stored_at: now_secs() - 120,
        };
        c.write_entry(&stale).unwrap();
        assert!(c.get(URL).is_none());

        c.put(URL, 200, "new");
        assert_eq!(c.get(URL).unwrap().body, "new");
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let c = cache(dir.path());
        let p = c.entry_path(URL);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, b"not json").unwrap();
        assert!(c.get(URL).is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("http");
        let c = ResponseCache::new(&root, Duration::from_secs(60));
        c.put(URL, 200, "x");
        c.put("https://other.example/", 200, "y");
        c.clear().unwrap();
        assert!(!root.exists());
        assert!(c.get(URL).is_none());
        c.clear().unwrap();
    }
}
