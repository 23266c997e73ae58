//! The persisted configuration document and its layered defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::source::{Source, SourceKind};
use crate::constants::{BOOTSTRAP_SOURCE_NAME, BOOTSTRAP_SOURCE_PATH, DEFAULT_CACHE_TTL_MS};

/// Cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether cached remote templates are read before fetching
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Time-to-live in milliseconds
    #[serde(rename = "ttl", default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

const fn default_enabled() -> bool {
    true
}

const fn default_ttl_ms() -> u64 {
    DEFAULT_CACHE_TTL_MS
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ttl_ms: default_ttl_ms(),
        }
    }
}

impl CacheSettings {
    /// TTL as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

/// Root configuration object: ordered sources plus cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Sources in priority order
    pub sources: Vec<Source>,
    /// Cache settings
    pub cache: CacheSettings,
}

impl Default for ConfigDocument {
    /// A single local source at `./templates` marked default, cache enabled
    /// with a one hour TTL.
    fn default() -> Self {
        let mut bootstrap = Source::new(BOOTSTRAP_SOURCE_NAME, SourceKind::Local, BOOTSTRAP_SOURCE_PATH);
        bootstrap.is_default = true;
        Self {
            sources: vec![bootstrap],
            cache: CacheSettings::default(),
        }
    }
}

/// A document as found on disk, where any top-level key may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfigDocument {
    /// Replaces the default source list when present
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
    /// Replaces the default cache settings when present
    #[serde(default)]
    pub cache: Option<CacheSettings>,
}

impl ConfigDocument {
    /// Overlay a partial document on the defaults.
    ///
    /// The merge is shallow: a present top-level key replaces the default
    /// value wholesale.
    #[must_use]
    pub fn layered(partial: PartialConfigDocument) -> Self {
        let defaults = Self::default();
        Self {
            sources: partial.sources.unwrap_or(defaults.sources),
            cache: partial.cache.unwrap_or(defaults.cache),
        }
    }

    /// Look up a source by name.
    #[must_use]
    pub fn find_source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// The source marked default, else the first configured source.
    #[must_use]
    pub fn default_source(&self) -> Option<&Source> {
        self.sources.iter().find(|s| s.is_default).or_else(|| self.sources.first())
    }
}
