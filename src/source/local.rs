//! Local directory sources.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

use super::FetchContext;
use crate::config::Source;
use crate::core::{AmpError, TemplateKind, validate_name};
use crate::utils::{expand_path, list_file_names};

/// Reads templates straight from a directory; the filesystem is its own cache.
#[derive(Debug)]
pub struct LocalFetcher<'a> {
    source: &'a Source,
    root: PathBuf,
}

impl<'a> LocalFetcher<'a> {
    /// Resolve the source location against the package root.
    pub fn new(source: &'a Source, ctx: &FetchContext) -> Self {
        Self {
            source,
            root: local_templates_root(source, &ctx.package_root),
        }
    }

    pub(super) async fn fetch_file(&self, kind: TemplateKind, name: &str) -> Result<String> {
        validate_name(name)?;
        let path = self.root.join(kind.relative_path(name));

        match fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!(
                    target: "ampackage::source",
                    "Read {} '{}' from {}",
                    kind,
                    name,
                    path.display()
                );
                Ok(content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AmpError::TemplateNotFound {
                kind: kind.to_string(),
                name: name.to_string(),
                source_name: self.source.name.clone(),
            }
            .into()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read {} from source '{}'", path.display(), self.source.name)
            }),
        }
    }

    pub(super) async fn list_templates(&self, kind: TemplateKind) -> Result<Vec<String>> {
        let dir = self.root.join(kind.directory());
        let files = list_file_names(&dir)
            .await
            .with_context(|| format!("Failed to list templates in source '{}'", self.source.name))?;
        Ok(files.iter().filter_map(|f| kind.strip_extension(f).map(str::to_string)).collect())
    }
}

/// Directory of a local source: its expanded location, plus the base path
/// when one is configured.
pub fn local_templates_root(source: &Source, package_root: &std::path::Path) -> PathBuf {
    let location = expand_path(&source.location, package_root);
    match source.effective_base_path() {
        Some(base) => location.join(base),
        None => location,
    }
}
