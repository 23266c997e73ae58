//! ampackage - template scaffolding from local and Git-hosted sources
//!
//! ampackage copies named templates (UI components, hooks and utility
//! modules) from an ordered list of sources into a project, and pushes edited
//! templates back to a source.
//!
//! # Architecture Overview
//!
//! ```text
//! CLI ─► config (sources) ─► resolver ─► source fetchers ─► cache
//!                                │
//!                                └─► project file
//!
//! project file ─► publish ─► local directory | git clone ─► commit ─► push
//! ```
//!
//! - Sources are tried in their configured order; the first one that has a
//!   template wins, and when none does every source's failure is reported.
//! - Remote (GitHub) fetches go through a per-source on-disk cache with a TTL.
//! - Pushing to a Git-backed source works in a local clone and can target a
//!   fresh review branch instead of the configured one.
//!
//! # Core Modules
//!
//! - [`config`] - `.ampackage.json`: sources and cache settings
//! - [`cache`] - TTL cache of remote template contents
//! - [`source`] - fetch strategies for local, GitHub and registry sources
//! - [`resolver`] - ordered multi-source resolution and merged listings
//! - [`publish`] - pushing templates back to local or Git-backed sources
//! - [`git`] - system `git` wrapper behind the [`git::GitOps`] trait
//! - [`core`] - template kinds and the error model
//! - [`cli`] - command-line front end
//!
//! # Example
//!
//! ```rust,no_run
//! use ampackage::cache::TemplateCache;
//! use ampackage::config::ConfigStore;
//! use ampackage::core::TemplateKind;
//! use ampackage::resolver::Resolver;
//! use ampackage::source::FetchContext;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = ConfigStore::at(".ampackage.json");
//! let document = store.load().await;
//! let ctx = FetchContext::new(".", TemplateCache::new("/tmp/ampackage-cache"))?
//!     .with_cache_settings(&document.cache);
//!
//! let resolved = Resolver::new(&ctx)
//!     .fetch_template(&document.sources, TemplateKind::Component, "Button")
//!     .await?;
//! println!("{} bytes from {}", resolved.content.len(), resolved.source.name);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod git;
pub mod publish;
pub mod resolver;
pub mod source;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
