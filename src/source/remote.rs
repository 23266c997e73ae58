//! GitHub-hosted sources fetched over raw-content HTTP.
//!
//! A repository URL such as `https://github.com/acme/templates.git` with branch
//! `main` and base path `templates` maps a component `Button` to
//!
//! ```text
//! https://raw.githubusercontent.com/acme/templates/main/templates/components/Button.tsx
//! ```

use anyhow::Result;

use super::FetchContext;
use crate::config::Source;
use crate::constants::GITHUB_URL_PREFIX;
use crate::core::{AmpError, TemplateKind, validate_name};

/// `<owner>/<repo>` of a `https://github.com/` URL, without `.git` or a
/// trailing slash.
#[must_use]
pub fn github_repo_path(url: &str) -> Option<&str> {
    let rest = url.strip_prefix(GITHUB_URL_PREFIX)?.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let mut parts = rest.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Some(rest),
        _ => None,
    }
}

/// Raw-content URL of one template in a Git-backed source.
pub fn raw_content_url(
    source: &Source,
    raw_base_url: &str,
    kind: TemplateKind,
    name: &str,
) -> Result<String, AmpError> {
    let repo = github_repo_path(&source.location).ok_or_else(|| AmpError::UnsupportedRemoteUrl {
        url: source.location.clone(),
    })?;

    let mut url = format!("{}/{}/{}", raw_base_url.trim_end_matches('/'), repo, source.branch_or_default());
    if let Some(base) = source.effective_base_path().map(|b| b.trim_matches('/')).filter(|b| !b.is_empty()) {
        url.push('/');
        url.push_str(base);
    }
    url.push('/');
    url.push_str(kind.directory());
    url.push('/');
    url.push_str(&kind.file_name(name));
    Ok(url)
}

/// Fetcher for `github` sources, reading through the template cache.
#[derive(Debug)]
pub struct GitFetcher<'a> {
    source: &'a Source,
    ctx: &'a FetchContext,
}

impl<'a> GitFetcher<'a> {
    /// Wrap a Git-backed source.
    pub const fn new(source: &'a Source, ctx: &'a FetchContext) -> Self {
        Self {
            source,
            ctx,
        }
    }

    pub(super) async fn fetch_file(&self, kind: TemplateKind, name: &str) -> Result<String> {
        validate_name(name)?;
        let source_name = &self.source.name;

        if self.ctx.use_cache {
            if let Some(content) = self.ctx.cache.get(source_name, kind, name, self.ctx.ttl).await {
                return Ok(content);
            }
        }

        let url = raw_content_url(self.source, &self.ctx.raw_base_url, kind, name)?;
        tracing::debug!(target: "ampackage::source", "({}) GET {}", source_name, url);

        let response = self.ctx.http.get(&url).send().await.map_err(|e| AmpError::HttpRequest {
            source_name: source_name.clone(),
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AmpError::TemplateNotFound {
                kind: kind.to_string(),
                name: name.to_string(),
                source_name: source_name.clone(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(AmpError::HttpStatus {
                source_name: source_name.clone(),
                url,
                status: status.to_string(),
            }
            .into());
        }

        let content = response.text().await.map_err(|e| AmpError::HttpRequest {
            source_name: source_name.clone(),
            url: url.clone(),
            reason: e.to_string(),
        })?;

        self.ctx.cache.set(source_name, kind, name, &content).await?;
        Ok(content)
    }

    /// Names cached for this source. The remote listing is not queried, so
    /// templates never fetched by name do not appear.
    pub(super) async fn list_templates(&self, kind: TemplateKind) -> Result<Vec<String>> {
        tracing::debug!(
            target: "ampackage::source",
            "({}) Listing {} templates from cache only",
            self.source.name,
            kind
        );
        self.ctx.cache.list_cached(&self.source.name, kind).await
    }
}
