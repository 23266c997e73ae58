//! Test utilities for ampackage
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests under `tests/`.
//!
//! - [`FakeGit`]: in-memory [`GitOps`](crate::git::GitOps) for publish tests
//! - [`TestGit`]: thin wrapper over the real `git` binary for fixture repos
//! - [`init_test_logging`]: one-time tracing setup

pub mod fake_git;
pub mod git_helper;

pub use fake_git::FakeGit;
pub use git_helper::TestGit;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honoured when present and logging stays off when
/// it is not.
///
/// ```bash
/// RUST_LOG=ampackage=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
