//! Integration test suite for ampackage
//!
//! End-to-end tests that drive the `ampackage` binary against temporary
//! projects. `HOME` is redirected so no real user configuration or cache is
//! touched.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **add**: copying templates into a project
//! - **cache**: clearing the template cache
//! - **list**: merged template listings
//! - **push**: publishing to local and real git sources
//! - **source**: source management and the persisted configuration

mod common;

mod add;
mod cache;
mod list;
mod push;
mod source;
