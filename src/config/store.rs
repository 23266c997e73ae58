//! Loading and persisting the configuration document.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::document::{ConfigDocument, PartialConfigDocument};
use super::source::{Source, SourceKind, SourceOptions};
use crate::constants::CONFIG_FILE_NAME;
use crate::core::{AmpError, validate_name};
use crate::utils::safe_write;

/// Reads and writes `.ampackage.json` at a fixed path.
///
/// The path is chosen once by [`ConfigStore::discover`], so [`ConfigStore::save`]
/// always writes to the file [`ConfigStore::load`] reads.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Pick the configuration file: `<cwd>/.ampackage.json` if it exists,
    /// otherwise `<home>/.ampackage.json`.
    ///
    /// Without a home directory the working directory is used.
    pub fn discover(cwd: &Path, home: Option<&Path>) -> Self {
        let local = cwd.join(CONFIG_FILE_NAME);
        let path = match home {
            Some(home) if !local.exists() => home.join(CONFIG_FILE_NAME),
            _ => local,
        };
        tracing::debug!(target: "ampackage::config", "Using configuration file {}", path.display());
        Self {
            path,
        }
    }

    /// Use an explicit configuration file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, layered over the defaults.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is logged as a warning and also yields the defaults.
    pub async fn load(&self) -> ConfigDocument {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ConfigDocument::default();
            }
            Err(e) => {
                tracing::warn!(
                    target: "ampackage::config",
                    "Failed to read {}: {}; using defaults",
                    self.path.display(),
                    e
                );
                return ConfigDocument::default();
            }
        };

        match serde_json::from_str::<PartialConfigDocument>(&content) {
            Ok(partial) => ConfigDocument::layered(partial),
            Err(e) => {
                tracing::warn!(
                    target: "ampackage::config",
                    "Failed to parse {}: {}; using defaults",
                    self.path.display(),
                    e
                );
                ConfigDocument::default()
            }
        }
    }

    /// Write the document as pretty-printed JSON.
    pub async fn save(&self, document: &ConfigDocument) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(document).context("Failed to serialize configuration")?;
        content.push('\n');
        safe_write(&self.path, &content)
            .await
            .with_context(|| format!("Failed to write configuration to {}", self.path.display()))
    }

    /// Add a source, replacing any existing source with the same name in place.
    ///
    /// New names are appended. Marking a source default clears the flag on the
    /// others.
    pub async fn add_source(
        &self,
        name: &str,
        kind: SourceKind,
        location: &str,
        options: SourceOptions,
    ) -> Result<Source> {
        validate_name(name).map_err(|e| AmpError::ConfigError {
            message: format!("invalid source name: {e}"),
        })?;

        let source = Source {
            name: name.to_string(),
            kind,
            location: location.to_string(),
            branch: options.branch,
            base_path: options.base_path,
            is_default: options.is_default,
        };

        let mut document = self.load().await;
        if source.is_default {
            for existing in &mut document.sources {
                existing.is_default = false;
            }
        }
        match document.sources.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                tracing::debug!(target: "ampackage::config", "Replacing source '{}'", name);
                *existing = source.clone();
            }
            None => {
                tracing::debug!(target: "ampackage::config", "Appending source '{}'", name);
                document.sources.push(source.clone());
            }
        }

        self.save(&document).await?;
        Ok(source)
    }

    /// Remove a source by name.
    ///
    /// Fails with [`AmpError::SourceNotFound`] without touching the file when
    /// no source has that name.
    pub async fn remove_source(&self, name: &str) -> Result<()> {
        let mut document = self.load().await;
        let before = document.sources.len();
        document.sources.retain(|s| s.name != name);

        if document.sources.len() == before {
            return Err(AmpError::SourceNotFound {
                name: name.to_string(),
            }
            .into());
        }

        self.save(&document).await
    }

    /// Configured sources in insertion order.
    pub async fn list_sources(&self) -> Vec<Source> {
        self.load().await.sources
    }
}
