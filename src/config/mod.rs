//! Configuration management for ampackage
//!
//! Configuration lives in a single JSON document, `.ampackage.json`, looked up
//! in the working directory first and then in the user's home directory:
//!
//! ```json
//! {
//!   "sources": [
//!     { "name": "local", "type": "local", "path": "./templates", "default": true },
//!     { "name": "company", "type": "github", "url": "https://github.com/acme/templates.git",
//!       "branch": "main", "basePath": "templates" }
//!   ],
//!   "cache": { "enabled": true, "ttl": 3600000 }
//! }
//! ```
//!
//! Sources are tried in the order they appear. A missing or unparsable file
//! yields the defaults; top-level keys present in the file replace the
//! defaults wholesale (see [`ConfigDocument::layered`]).
//!
//! # Modules
//!
//! - `source` - [`Source`] entries and their on-disk record shape
//! - `document` - [`ConfigDocument`], [`PartialConfigDocument`] and cache settings
//! - `store` - [`ConfigStore`] load/save and source management

mod document;
mod source;
mod store;

pub use document::{CacheSettings, ConfigDocument, PartialConfigDocument};
pub use source::{Source, SourceKind, SourceOptions};
pub use store::ConfigStore;

use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, CACHE_DIR_NAME, REPOS_DIR_NAME};

/// Per-user runtime directories, derived from an explicit home directory.
///
/// ```text
/// <home>/.ampackage/
/// ├── cache/<source>/<kind dir>/<name><ext>
/// └── repos/<source>/
/// ```
#[derive(Debug, Clone)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Directories below `<home>/.ampackage`.
    pub fn from_home(home: &Path) -> Self {
        Self {
            root: home.join(APP_DIR_NAME),
        }
    }

    /// Root of the template cache.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR_NAME)
    }

    /// Root of the per-source working clones.
    #[must_use]
    pub fn repos_dir(&self) -> PathBuf {
        self.root.join(REPOS_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dirs_layout() {
        let dirs = AppDirs::from_home(Path::new("/home/me"));
        assert_eq!(dirs.cache_dir(), PathBuf::from("/home/me/.ampackage/cache"));
        assert_eq!(dirs.repos_dir(), PathBuf::from("/home/me/.ampackage/repos"));
    }
}
