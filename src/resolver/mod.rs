//! Source resolution for ampackage.
//!
//! The resolver walks the configured sources **in order** and asks each one's
//! [`Fetcher`] for a template. The first source that can provide it wins; a
//! later source is never consulted once an earlier one succeeds. Sources are
//! tried sequentially, because the declared order is the priority order.
//!
//! When every source fails, the individual failures are collected into
//! [`AmpError::AllSourcesFailed`], one line per source:
//!
//! ```text
//! Could not fetch component 'Button' from any source:
//! local: Template component 'Button' not found in source 'local'
//! company: Failed to fetch https://raw.githubusercontent.com/... from source 'company': 500 Internal Server Error
//! ```
//!
//! Listing merges the names every source reports for each kind. A source that
//! cannot be listed is logged and skipped.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Source;
use crate::core::{AmpError, SourceFailure, TemplateKind, validate_name};
use crate::source::{FetchContext, Fetcher};

/// A template together with the source that provided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Template content
    pub content: String,
    /// Source the content came from
    pub source: Source,
}

/// Merged listing: every kind mapped to sorted, de-duplicated names.
pub type TemplateListing = BTreeMap<TemplateKind, Vec<String>>;

/// Resolves templates against an ordered list of sources.
#[derive(Debug)]
pub struct Resolver<'a> {
    ctx: &'a FetchContext,
}

impl<'a> Resolver<'a> {
    /// Resolver using `ctx` for every fetch.
    pub const fn new(ctx: &'a FetchContext) -> Self {
        Self {
            ctx,
        }
    }

    /// Fetch a template from the first source that has it.
    ///
    /// # Errors
    ///
    /// - [`AmpError::InvalidTemplateName`] before any source is tried
    /// - [`AmpError::NoSources`] when `sources` is empty
    /// - [`AmpError::AllSourcesFailed`] listing every source when none succeeded
    pub async fn fetch_template(
        &self,
        sources: &[Source],
        kind: TemplateKind,
        name: &str,
    ) -> Result<ResolvedTemplate> {
        validate_name(name)?;
        if sources.is_empty() {
            return Err(AmpError::NoSources.into());
        }

        let mut failures = Vec::with_capacity(sources.len());
        for source in sources {
            let fetcher = Fetcher::for_source(source, self.ctx);
            match fetcher.fetch_file(kind, name).await {
                Ok(content) => {
                    tracing::debug!(
                        target: "ampackage::resolver",
                        "Resolved {} '{}' from source '{}'",
                        kind,
                        name,
                        source.name
                    );
                    return Ok(ResolvedTemplate {
                        content,
                        source: source.clone(),
                    });
                }
                Err(e) => {
                    tracing::debug!(
                        target: "ampackage::resolver",
                        "Source '{}' could not provide {} '{}': {:#}",
                        source.name,
                        kind,
                        name,
                        e
                    );
                    failures.push(SourceFailure {
                        source_name: source.name.clone(),
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        Err(AmpError::AllSourcesFailed {
            kind: kind.to_string(),
            name: name.to_string(),
            failures,
        }
        .into())
    }

    /// Names available for every kind across `sources`, merged and sorted.
    ///
    /// Sources that fail to list are logged as warnings and skipped.
    pub async fn list_all_templates(&self, sources: &[Source]) -> TemplateListing {
        let mut listing = TemplateListing::new();

        for kind in TemplateKind::ALL {
            let mut names = BTreeSet::new();
            for source in sources {
                match Fetcher::for_source(source, self.ctx).list_templates(kind).await {
                    Ok(found) => names.extend(found),
                    Err(e) => tracing::warn!(
                        target: "ampackage::resolver",
                        "Failed to list {} templates from source '{}': {:#}",
                        kind,
                        source.name,
                        e
                    ),
                }
            }
            listing.insert(kind, names.into_iter().collect());
        }

        listing
    }
}
