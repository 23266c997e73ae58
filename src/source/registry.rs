//! Package-registry sources. Present so the source kinds stay exhaustive;
//! every operation fails with [`AmpError::NotImplemented`].

use anyhow::Result;

use crate::config::Source;
use crate::core::{AmpError, TemplateKind};

/// Fetcher for `npm` sources.
#[derive(Debug)]
pub struct RegistryFetcher<'a> {
    source: &'a Source,
}

impl<'a> RegistryFetcher<'a> {
    /// Wrap a registry source.
    pub const fn new(source: &'a Source) -> Self {
        Self {
            source,
        }
    }

    fn not_implemented(&self, operation: &str) -> anyhow::Error {
        tracing::debug!(
            target: "ampackage::source",
            "{} requested from registry source '{}'",
            operation,
            self.source.name
        );
        AmpError::NotImplemented {
            operation: operation.to_string(),
            kind: self.source.kind.to_string(),
        }
        .into()
    }

    pub(super) async fn fetch_file(&self, _kind: TemplateKind, _name: &str) -> Result<String> {
        Err(self.not_implemented("Fetching templates"))
    }

    pub(super) async fn list_templates(&self, _kind: TemplateKind) -> Result<Vec<String>> {
        Err(self.not_implemented("Listing templates"))
    }
}
