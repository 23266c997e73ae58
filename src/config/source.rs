//! Source entries: where templates live.
//!
//! In memory a [`Source`] has a typed [`SourceKind`] and a single `location`.
//! On disk it uses the record shape of `.ampackage.json`:
//!
//! ```json
//! { "name": "company", "type": "github", "url": "https://github.com/acme/templates.git",
//!   "branch": "main", "basePath": "templates", "default": true }
//! ```
//!
//! Local sources store their location under `path`, remote ones under `url`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_BASE_PATH, DEFAULT_BRANCH};
use crate::core::{AmpError, validate_name};

/// Kind of template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    /// Directory on the local filesystem
    #[default]
    Local,
    /// GitHub-hosted repository, fetched over raw-content HTTP and pushed with git
    Git,
    /// Package registry (not implemented)
    Registry,
}

impl SourceKind {
    /// Name used in the configuration file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Git => "github",
            Self::Registry => "npm",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "github" | "git" => Ok(Self::Git),
            "npm" | "registry" => Ok(Self::Registry),
            _ => Err(AmpError::InvalidSourceKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// A named, ordered configuration entry describing where templates live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SourceRecord", into = "SourceRecord")]
pub struct Source {
    /// Unique name; also the key of the source's cache and clone directories
    pub name: String,
    /// Kind of source
    pub kind: SourceKind,
    /// Filesystem path (local) or repository URL (git, registry)
    pub location: String,
    /// Branch for git sources
    pub branch: Option<String>,
    /// Subdirectory inside the source holding the kind directories
    pub base_path: Option<String>,
    /// Whether this is the default push target
    pub is_default: bool,
}

impl Source {
    /// Create a source with no branch, base path or default flag.
    pub fn new(name: impl Into<String>, kind: SourceKind, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            location: location.into(),
            branch: None,
            base_path: None,
            is_default: false,
        }
    }

    /// Configured branch, or `main`.
    #[must_use]
    pub fn branch_or_default(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// Base path for the kind directories.
    ///
    /// Git sources default to `templates`; local sources use their location
    /// as-is unless a base path was configured.
    #[must_use]
    pub fn effective_base_path(&self) -> Option<&str> {
        match (self.kind, self.base_path.as_deref()) {
            (_, Some(path)) => Some(path),
            (SourceKind::Local, None) => None,
            (SourceKind::Git | SourceKind::Registry, None) => Some(DEFAULT_BASE_PATH),
        }
    }
}

/// Optional fields accepted when adding a source.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Branch (git sources)
    pub branch: Option<String>,
    /// Base path inside the source
    pub base_path: Option<String>,
    /// Mark the source as the default push target
    pub is_default: bool,
}

/// Serialized form of a [`Source`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceRecord {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_path: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    default: bool,
}

impl TryFrom<SourceRecord> for Source {
    type Error = AmpError;

    fn try_from(record: SourceRecord) -> Result<Self, Self::Error> {
        validate_name(&record.name).map_err(|e| AmpError::ConfigError {
            message: format!("invalid source name: {e}"),
        })?;
        let kind = match record.kind.as_deref() {
            Some(kind) => kind.parse()?,
            None => SourceKind::default(),
        };
        let location = match kind {
            SourceKind::Local => record.path.or(record.url),
            SourceKind::Git | SourceKind::Registry => record.url.or(record.path),
        }
        .ok_or_else(|| AmpError::ConfigError {
            message: format!("source '{}' has neither a path nor a url", record.name),
        })?;

        Ok(Self {
            name: record.name,
            kind,
            location,
            branch: record.branch,
            base_path: record.base_path,
            is_default: record.default,
        })
    }
}

impl From<Source> for SourceRecord {
    fn from(source: Source) -> Self {
        let (path, url) = match source.kind {
            SourceKind::Local => (Some(source.location), None),
            SourceKind::Git | SourceKind::Registry => (None, Some(source.location)),
        };
        Self {
            name: source.name,
            kind: Some(source.kind.as_str().to_string()),
            path,
            url,
            branch: source.branch,
            base_path: source.base_path,
            default: source.is_default,
        }
    }
}
