//! Source fetchers: one strategy per [`SourceKind`].
//!
//! Each configured [`Source`] is turned into a [`Fetcher`] with
//! [`Fetcher::for_source`]. All fetchers expose the same two operations:
//!
//! - [`Fetcher::fetch_file`] returns the content of one template
//! - [`Fetcher::list_templates`] returns the template names available for a kind
//!
//! | Kind       | Fetch                                  | List                      |
//! |------------|----------------------------------------|---------------------------|
//! | `local`    | read from the filesystem               | directory listing         |
//! | `github`   | raw-content HTTP GET, write-through cache | names already cached   |
//! | `npm`      | not implemented                        | not implemented           |
//!
//! A fetcher never caches for another source: remote results are cached
//! under the name of the source that produced them.

mod local;
mod registry;
mod remote;

pub use local::{LocalFetcher, local_templates_root};
pub use registry::RegistryFetcher;
pub use remote::{GitFetcher, github_repo_path, raw_content_url};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::TemplateCache;
use crate::config::{CacheSettings, Source, SourceKind};
use crate::constants::{GITHUB_RAW_BASE_URL, HTTP_TIMEOUT};
use crate::core::TemplateKind;

/// Everything a fetcher needs besides the source itself.
///
/// The package root is injected explicitly; relative local source locations
/// are resolved against it and never against ambient process state.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// Root that relative local source locations are resolved against
    pub package_root: PathBuf,
    /// Cache for remote fetches
    pub cache: TemplateCache,
    /// HTTP client for raw-content fetches
    pub http: reqwest::Client,
    /// Base URL that `<owner>/<repo>/<branch>/...` is appended to
    pub raw_base_url: String,
    /// Maximum age of a usable cache entry
    pub ttl: Duration,
    /// Whether cache entries may satisfy a fetch
    pub use_cache: bool,
}

impl FetchContext {
    /// Context with default cache settings and the GitHub raw-content host.
    pub fn new(package_root: impl Into<PathBuf>, cache: TemplateCache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ampackage/", env!("CARGO_PKG_VERSION")))
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        let settings = CacheSettings::default();

        Ok(Self {
            package_root: package_root.into(),
            cache,
            http,
            raw_base_url: GITHUB_RAW_BASE_URL.to_string(),
            ttl: settings.ttl(),
            use_cache: settings.enabled,
        })
    }

    /// Apply cache settings from the configuration document.
    #[must_use]
    pub const fn with_cache_settings(mut self, settings: &CacheSettings) -> Self {
        self.ttl = settings.ttl();
        self.use_cache = settings.enabled;
        self
    }

    /// Override whether cache entries may satisfy a fetch.
    #[must_use]
    pub const fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Override the raw-content host (used against mock servers).
    #[must_use]
    pub fn with_raw_base_url(mut self, url: impl Into<String>) -> Self {
        self.raw_base_url = url.into();
        self
    }
}

/// Fetch strategy for one source, selected by its kind.
#[derive(Debug)]
pub enum Fetcher<'a> {
    /// Local directory
    Local(LocalFetcher<'a>),
    /// GitHub-hosted repository
    Git(GitFetcher<'a>),
    /// Package registry
    Registry(RegistryFetcher<'a>),
}

impl<'a> Fetcher<'a> {
    /// Select the strategy for `source`.
    pub fn for_source(source: &'a Source, ctx: &'a FetchContext) -> Self {
        match source.kind {
            SourceKind::Local => Self::Local(LocalFetcher::new(source, ctx)),
            SourceKind::Git => Self::Git(GitFetcher::new(source, ctx)),
            SourceKind::Registry => Self::Registry(RegistryFetcher::new(source)),
        }
    }

    /// Content of one template.
    pub async fn fetch_file(&self, kind: TemplateKind, name: &str) -> Result<String> {
        match self {
            Self::Local(fetcher) => fetcher.fetch_file(kind, name).await,
            Self::Git(fetcher) => fetcher.fetch_file(kind, name).await,
            Self::Registry(fetcher) => fetcher.fetch_file(kind, name).await,
        }
    }

    /// Names of templates of `kind` this source can provide.
    pub async fn list_templates(&self, kind: TemplateKind) -> Result<Vec<String>> {
        match self {
            Self::Local(fetcher) => fetcher.list_templates(kind).await,
            Self::Git(fetcher) => fetcher.list_templates(kind).await,
            Self::Registry(fetcher) => fetcher.list_templates(kind).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetcher_selection_follows_kind() {
        let temp = TempDir::new().unwrap();
        let ctx = FetchContext::new(temp.path(), TemplateCache::new(temp.path().join("cache"))).unwrap();

        let local = Source::new("l", SourceKind::Local, "./templates");
        let git = Source::new("g", SourceKind::Git, "https://github.com/acme/t.git");
        let npm = Source::new("n", SourceKind::Registry, "@acme/templates");

        assert!(matches!(Fetcher::for_source(&local, &ctx), Fetcher::Local(_)));
        assert!(matches!(Fetcher::for_source(&git, &ctx), Fetcher::Git(_)));
        assert!(matches!(Fetcher::for_source(&npm, &ctx), Fetcher::Registry(_)));
    }

    #[test]
    fn test_context_cache_settings() {
        let temp = TempDir::new().unwrap();
        let settings = CacheSettings {
            enabled: false,
            ttl_ms: 1_000,
        };
        let ctx = FetchContext::new(temp.path(), TemplateCache::new(temp.path()))
            .unwrap()
            .with_cache_settings(&settings);

        assert!(!ctx.use_cache);
        assert_eq!(ctx.ttl, Duration::from_secs(1));
        assert_eq!(ctx.raw_base_url, "https://raw.githubusercontent.com");
    }
}
