//! On-disk cache for templates fetched from remote sources.
//!
//! Every entry lives at a path derived only from the source name and the
//! template reference:
//!
//! ```text
//! <cache root>/<source>/<kind dir>/<name><ext>
//! ~/.ampackage/cache/company/components/Button.tsx
//! ```
//!
//! Freshness is checked lazily on read from the file's modification time;
//! nothing is evicted proactively. An entry is fresh while its age is strictly
//! below the TTL.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ampackage::cache::TemplateCache;
//! use ampackage::core::TemplateKind;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = TemplateCache::new("/home/me/.ampackage/cache");
//! cache.set("company", TemplateKind::Component, "Button", "export const Button = () => null;").await?;
//!
//! let hit = cache.get("company", TemplateKind::Component, "Button", Duration::from_secs(3600)).await;
//! assert!(hit.is_some());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs as async_fs;

use crate::core::{TemplateKind, validate_name};
use crate::utils::{list_file_names, safe_write};

/// Cache of remote template contents keyed by `(source, kind, name)`.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    root: PathBuf,
}

/// Summary of what the cache currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of source directories
    pub sources: usize,
    /// Number of cached template files across all sources and kinds
    pub entries: usize,
}

/// Whether an entry modified at `modified` is still fresh at `now`.
///
/// Timestamps in the future count as age zero.
#[must_use]
pub fn is_fresh(modified: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
    age < ttl
}

impl TemplateCache {
    /// Cache rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Root directory of the cache.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic path of one cache entry.
    #[must_use]
    pub fn entry_path(&self, source: &str, kind: TemplateKind, name: &str) -> PathBuf {
        self.root.join(source).join(kind.relative_path(name))
    }

    /// Cached content if present and younger than `ttl`.
    ///
    /// A missing, stale or unreadable entry is a miss, not an error.
    pub async fn get(
        &self,
        source: &str,
        kind: TemplateKind,
        name: &str,
        ttl: Duration,
    ) -> Option<String> {
        self.get_as_of(source, kind, name, ttl, SystemTime::now()).await
    }

    /// [`get`](Self::get) evaluated at an explicit point in time.
    pub async fn get_as_of(
        &self,
        source: &str,
        kind: TemplateKind,
        name: &str,
        ttl: Duration,
        now: SystemTime,
    ) -> Option<String> {
        let path = self.entry_path(source, kind, name);
        let modified = async_fs::metadata(&path).await.ok()?.modified().ok()?;

        if !is_fresh(modified, now, ttl) {
            tracing::debug!(
                target: "ampackage::cache",
                "Cache entry for {} '{}' from '{}' is stale",
                kind,
                name,
                source
            );
            return None;
        }

        match async_fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!(
                    target: "ampackage::cache",
                    "Cache hit for {} '{}' from '{}'",
                    kind,
                    name,
                    source
                );
                Some(content)
            }
            Err(e) => {
                tracing::debug!(
                    target: "ampackage::cache",
                    "Failed to read cache entry {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Store content for `(source, kind, name)`, overwriting any existing entry.
    pub async fn set(&self, source: &str, kind: TemplateKind, name: &str, content: &str) -> Result<()> {
        let path = self.entry_path(source, kind, name);
        safe_write(&path, content)
            .await
            .with_context(|| format!("Failed to cache {kind} '{name}' from source '{source}'"))?;
        tracing::debug!(target: "ampackage::cache", "Cached {} '{}' from '{}'", kind, name, source);
        Ok(())
    }

    /// Names of cached templates for one source and kind, sorted.
    ///
    /// Returns an empty list if nothing was cached yet.
    pub async fn list_cached(&self, source: &str, kind: TemplateKind) -> Result<Vec<String>> {
        let dir = self.root.join(source).join(kind.directory());
        let names = list_file_names(&dir)
            .await?
            .iter()
            .filter_map(|file| kind.strip_extension(file).map(str::to_string))
            .collect();
        Ok(names)
    }

    /// Remove cached entries for one source, or the whole cache.
    ///
    /// Returns whether anything was removed. A source name that is not a
    /// single path segment is rejected before touching the filesystem.
    pub async fn clear(&self, source: Option<&str>) -> Result<bool> {
        let target = match source {
            Some(source) => {
                validate_name(source).with_context(|| format!("Invalid source name '{source}'"))?;
                self.root.join(source)
            }
            None => self.root.clone(),
        };

        if !target.exists() {
            return Ok(false);
        }

        async_fs::remove_dir_all(&target)
            .await
            .with_context(|| format!("Failed to clear cache directory: {}", target.display()))?;
        tracing::debug!(target: "ampackage::cache", "Removed {}", target.display());
        Ok(true)
    }

    /// Count cached sources and entries.
    pub async fn stats(&self) -> Result<CacheStats> {
        let mut stats = CacheStats::default();
        let mut sources = match async_fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(stats),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read cache directory: {}", self.root.display()));
            }
        };

        while let Some(entry) = sources.next_entry().await.context("Failed to read directory entry")? {
            if !entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            stats.sources += 1;
            for kind in TemplateKind::ALL {
                stats.entries += list_file_names(&entry.path().join(kind.directory())).await?.len();
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_entry_path() {
        let cache = TemplateCache::new("/cache");
        assert_eq!(
            cache.entry_path("company", TemplateKind::Component, "Button"),
            PathBuf::from("/cache/company/components/Button.tsx")
        );
        assert_eq!(
            cache.entry_path("company", TemplateKind::Util, "format"),
            PathBuf::from("/cache/company/utils/format.ts")
        );
    }

    #[test]
    fn test_is_fresh_boundary() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let ttl = Duration::from_secs(10);

        assert!(is_fresh(modified, modified + Duration::from_secs(9), ttl));
        assert!(!is_fresh(modified, modified + ttl, ttl));
        assert!(is_fresh(modified, modified - Duration::from_secs(5), ttl));
    }

    #[tokio::test]
    async fn test_round_trip_and_expiry() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path());

        cache.set("remote", TemplateKind::Hook, "useAuth", "export {}").await.unwrap();

        let hit = cache.get("remote", TemplateKind::Hook, "useAuth", HOUR).await;
        assert_eq!(hit.as_deref(), Some("export {}"));

        let later = SystemTime::now() + HOUR + Duration::from_secs(1);
        let miss = cache.get_as_of("remote", TemplateKind::Hook, "useAuth", HOUR, later).await;
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_miss() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path());
        assert!(cache.get("remote", TemplateKind::Component, "Nope", HOUR).await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path());

        cache.set("remote", TemplateKind::Component, "Card", "v1").await.unwrap();
        cache.set("remote", TemplateKind::Component, "Card", "v2").await.unwrap();

        let hit = cache.get("remote", TemplateKind::Component, "Card", HOUR).await;
        assert_eq!(hit.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_list_cached() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path());

        assert!(cache.list_cached("remote", TemplateKind::Component).await.unwrap().is_empty());

        cache.set("remote", TemplateKind::Component, "Card", "").await.unwrap();
        cache.set("remote", TemplateKind::Component, "Button", "").await.unwrap();
        cache.set("remote", TemplateKind::Hook, "useAuth", "").await.unwrap();

        let names = cache.list_cached("remote", TemplateKind::Component).await.unwrap();
        assert_eq!(names, vec!["Button", "Card"]);
    }

    #[tokio::test]
    async fn test_clear_one_source() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path());
        cache.set("a", TemplateKind::Component, "X", "").await.unwrap();
        cache.set("b", TemplateKind::Component, "Y", "").await.unwrap();

        assert!(cache.clear(Some("a")).await.unwrap());
        assert!(!cache.clear(Some("a")).await.unwrap());

        let stats = cache.stats().await.unwrap();
        assert_eq!(
            stats,
            CacheStats {
                sources: 1,
                entries: 1
            }
        );
    }

    #[tokio::test]
    async fn test_clear_all() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path().join("cache"));
        cache.set("a", TemplateKind::Util, "fmt", "").await.unwrap();

        assert!(cache.clear(None).await.unwrap());
        assert!(!cache.root().exists());
        assert_eq!(cache.stats().await.unwrap(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_clear_rejects_paths_outside_cache() {
        let temp = TempDir::new().unwrap();
        let cache = TemplateCache::new(temp.path().join(".ampackage/cache"));
        cache.set("company", TemplateKind::Component, "Button", "").await.unwrap();

        let clone = temp.path().join(".ampackage/repos/company/keep.txt");
        std::fs::create_dir_all(clone.parent().unwrap()).unwrap();
        std::fs::write(&clone, "keep").unwrap();
        let victim = temp.path().join("victim");
        std::fs::create_dir_all(&victim).unwrap();

        assert!(cache.clear(Some("..")).await.is_err());
        assert!(cache.clear(Some(victim.to_str().unwrap())).await.is_err());
        assert!(cache.clear(Some("company/components")).await.is_err());

        assert!(clone.exists());
        assert!(victim.exists());
        assert!(cache.entry_path("company", TemplateKind::Component, "Button").exists());
    }
}
