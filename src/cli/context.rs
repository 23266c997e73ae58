//! Per-invocation wiring shared by the subcommands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cache::TemplateCache;
use crate::config::{AppDirs, ConfigDocument, ConfigStore, Source};
use crate::core::AmpError;
use crate::source::FetchContext;

/// Paths and stores resolved once per command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Working directory of the invocation; project files live below it
    pub cwd: PathBuf,
    /// Root that relative local source locations are resolved against
    pub package_root: PathBuf,
    /// Configuration file in use
    pub store: ConfigStore,
    /// Cache and clone directories
    pub dirs: AppDirs,
}

impl CommandContext {
    /// Context for the current process: working directory and user home.
    pub fn from_env(root: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let home = dirs::home_dir().ok_or_else(|| AmpError::ConfigError {
            message: "Unable to determine home directory".to_string(),
        })?;
        Ok(Self::new(cwd, &home, root))
    }

    /// Context for an explicit working directory and home directory.
    ///
    /// A relative `root` is taken relative to `cwd`; without one the package
    /// root is `cwd` itself.
    pub fn new(cwd: PathBuf, home: &Path, root: Option<PathBuf>) -> Self {
        let package_root = match root {
            Some(root) if root.is_absolute() => root,
            Some(root) => cwd.join(root),
            None => cwd.clone(),
        };

        Self {
            store: ConfigStore::discover(&cwd, Some(home)),
            dirs: AppDirs::from_home(home),
            cwd,
            package_root,
        }
    }

    /// Cache below the user's app directory.
    #[must_use]
    pub fn template_cache(&self) -> TemplateCache {
        TemplateCache::new(self.dirs.cache_dir())
    }

    /// Fetch context honouring the document's cache settings.
    pub fn fetch_context(&self, document: &ConfigDocument) -> Result<FetchContext> {
        Ok(FetchContext::new(&self.package_root, self.template_cache())?.with_cache_settings(&document.cache))
    }

    /// Resolve a user-supplied path against the working directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Sources to consult: all of them, or only the one named by `--source`.
pub fn select_sources(document: &ConfigDocument, only: Option<&str>) -> Result<Vec<Source>, AmpError> {
    match only {
        Some(name) => document.find_source(name).cloned().map(|source| vec![source]).ok_or_else(|| {
            AmpError::SourceNotFound {
                name: name.to_string(),
            }
        }),
        None => Ok(document.sources.clone()),
    }
}
