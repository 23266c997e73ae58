//! Global constants used throughout the ampackage codebase.
//!
//! This module contains file names, directory names, default values and
//! timeouts that are shared across modules. Defining them centrally keeps
//! the on-disk layout discoverable in one place.

use std::time::Duration;

/// Name of the configuration document looked up in the working directory
/// and then in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".ampackage.json";

/// Name of the per-user application directory under the home directory.
pub const APP_DIR_NAME: &str = ".ampackage";

/// Cache subdirectory below [`APP_DIR_NAME`].
pub const CACHE_DIR_NAME: &str = "cache";

/// Working clone subdirectory below [`APP_DIR_NAME`].
pub const REPOS_DIR_NAME: &str = "repos";

/// Default time-to-live for cached remote templates, in milliseconds (1 hour).
pub const DEFAULT_CACHE_TTL_MS: u64 = 3_600_000;

/// Branch used for Git-backed sources that do not configure one.
pub const DEFAULT_BRANCH: &str = "main";

/// Subdirectory inside a Git-backed source that holds templates.
pub const DEFAULT_BASE_PATH: &str = "templates";

/// Name of the bootstrap source present when no configuration exists.
pub const BOOTSTRAP_SOURCE_NAME: &str = "local";

/// Location of the bootstrap source, relative to the package root.
pub const BOOTSTRAP_SOURCE_PATH: &str = "./templates";

/// Project directory `add` writes into when `--dest` is not given, and the
/// directory `push` reads from.
pub const DEFAULT_PROJECT_DIR: &str = "src";

/// Host prefix of repository URLs that can be rewritten into raw-content URLs.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Base of raw file URLs for GitHub-hosted sources.
pub const GITHUB_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Timeout for raw-content HTTP requests (30 seconds).
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for Git clone operations (120 seconds).
///
/// Clone operations may take longer than fetch, especially
/// for large repositories.
pub const GIT_CLONE_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for Git network operations other than clone (60 seconds).
pub const GIT_NETWORK_TIMEOUT: Duration = Duration::from_secs(60);

/// Prefix of branches created for review-branch pushes.
pub const REVIEW_BRANCH_PREFIX: &str = "ampackage";
