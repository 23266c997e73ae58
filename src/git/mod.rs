//! Git operations used by the publish engine.
//!
//! The publish engine talks to Git only through the narrow [`GitOps`] trait:
//! clone, fetch, checkout, reset, pull, branch, add, commit and push against a
//! working clone. [`SystemGit`] implements it by running the system `git`
//! binary through [`command_builder::GitCommand`]; tests substitute an
//! in-memory fake.
//!
//! Authentication is left to git itself (credential helpers, SSH agent).
//!
//! # Examples
//!
//! ```rust,no_run
//! use ampackage::git::{GitOps, SystemGit};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let git = SystemGit::new().with_context("company");
//! let clone = Path::new("/home/me/.ampackage/repos/company");
//! git.clone_repo("https://github.com/acme/templates.git", clone, "main").await?;
//! git.add(clone, "templates/components/Button.tsx").await?;
//! if git.has_staged_changes(clone).await? {
//!     git.commit(clone, "Update component Button").await?;
//!     git.push(clone, "main").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod command_builder;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::constants::{GIT_CLONE_TIMEOUT, GIT_NETWORK_TIMEOUT, GITHUB_URL_PREFIX};
use crate::core::AmpError;
use command_builder::GitCommand;

/// Git capability needed to publish into a working clone.
///
/// `repo` is always the working clone directory.
#[async_trait]
pub trait GitOps: Send + Sync {
    /// Clone `url` into `target`, checking out `branch`.
    async fn clone_repo(&self, url: &str, target: &Path, branch: &str) -> Result<()>;

    /// Fetch from `origin`.
    async fn fetch(&self, repo: &Path) -> Result<()>;

    /// Switch to an existing branch.
    async fn checkout(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Fast-forward `branch` from `origin`.
    async fn pull(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Move the checked-out branch to `origin/<branch>`, discarding local
    /// commits and changes.
    async fn reset_to_remote(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Create `branch` from the current HEAD and switch to it.
    async fn create_branch(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Delete a local branch that is not checked out.
    async fn delete_branch(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Stage a path relative to the clone root.
    async fn add(&self, repo: &Path, pathspec: &str) -> Result<()>;

    /// Whether the index differs from HEAD.
    async fn has_staged_changes(&self, repo: &Path) -> Result<bool>;

    /// Commit the index.
    async fn commit(&self, repo: &Path, message: &str) -> Result<()>;

    /// Push `branch` to `origin`.
    async fn push(&self, repo: &Path, branch: &str) -> Result<()>;
}

/// [`GitOps`] backed by the system `git` binary.
///
/// An optional label (the source name) prefixes every command's log lines.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    context: Option<String>,
}

impl SystemGit {
    /// Create a new system git handle.
    pub const fn new() -> Self {
        Self {
            context: None,
        }
    }

    /// Label log lines of every command with `context`.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn command(&self, cmd: GitCommand) -> GitCommand {
        match &self.context {
            Some(context) => cmd.with_context(context.as_str()),
            None => cmd,
        }
    }
}

#[async_trait]
impl GitOps for SystemGit {
    async fn clone_repo(&self, url: &str, target: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::clone(url, target, Some(branch)))
            .with_timeout(Some(GIT_CLONE_TIMEOUT))
            .execute_success()
            .await
    }

    async fn fetch(&self, repo: &Path) -> Result<()> {
        self.command(GitCommand::fetch())
            .current_dir(repo)
            .with_timeout(Some(GIT_NETWORK_TIMEOUT))
            .execute_success()
            .await
    }

    async fn checkout(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::checkout(branch)).current_dir(repo).execute_success().await
    }

    async fn pull(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::pull(branch))
            .current_dir(repo)
            .with_timeout(Some(GIT_NETWORK_TIMEOUT))
            .execute_success()
            .await
    }

    async fn reset_to_remote(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::reset_hard(&format!("origin/{branch}")))
            .current_dir(repo)
            .execute_success()
            .await
    }

    async fn create_branch(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::create_branch(branch)).current_dir(repo).execute_success().await
    }

    async fn delete_branch(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::delete_branch(branch)).current_dir(repo).execute_success().await
    }

    async fn add(&self, repo: &Path, pathspec: &str) -> Result<()> {
        self.command(GitCommand::add(pathspec)).current_dir(repo).execute_success().await
    }

    async fn has_staged_changes(&self, repo: &Path) -> Result<bool> {
        let staged = self.command(GitCommand::staged_files()).current_dir(repo).execute_stdout().await?;
        Ok(!staged.is_empty())
    }

    async fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        self.command(GitCommand::commit(message)).current_dir(repo).execute_success().await
    }

    async fn push(&self, repo: &Path, branch: &str) -> Result<()> {
        self.command(GitCommand::push(branch))
            .current_dir(repo)
            .with_timeout(Some(GIT_NETWORK_TIMEOUT))
            .execute_success()
            .await
    }
}

/// Fail with [`AmpError::GitNotFound`] unless `git` is on `PATH`.
pub fn ensure_git_available() -> Result<()> {
    which::which("git").map_err(|_| AmpError::GitNotFound)?;
    Ok(())
}

/// URL a reviewer can open to compare `branch` against `base`.
///
/// GitHub URLs get the `?expand=1` form that opens a pull request draft.
#[must_use]
pub fn compare_url(repo_url: &str, base: &str, branch: &str) -> String {
    let trimmed = repo_url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if trimmed.starts_with(GITHUB_URL_PREFIX) {
        format!("{trimmed}/compare/{base}...{branch}?expand=1")
    } else {
        format!("{trimmed}/compare/{base}...{branch}")
    }
}
