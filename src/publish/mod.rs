//! Publishing templates back to a source.
//!
//! - **Local sources**: the file is written straight into the source
//!   directory. An existing file is left alone unless `overwrite` is set.
//! - **Git sources**: a working clone under `<home>/.ampackage/repos/<source>`
//!   is created or brought up to date (fetch, checkout, reset to the remote
//!   branch, pull), the file is written and staged, and, if anything changed,
//!   committed and pushed. Resetting drops commits left behind by an earlier
//!   push that failed, so retrying commits the file again. In review mode the
//!   commit goes to a fresh branch `ampackage/<kind>-<name>-<millis>` and a
//!   compare URL is returned; no pull request is opened. A review branch with
//!   nothing to commit is deleted again.
//! - **Registry sources** cannot be pushed to.
//!
//! Clone, pull and push failures propagate with the source name attached.
//! Nothing is retried.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{Source, SourceKind};
use crate::constants::REVIEW_BRANCH_PREFIX;
use crate::core::{AmpError, TemplateKind, validate_name};
use crate::git::{GitOps, compare_url};
use crate::source::local_templates_root;
use crate::utils::{ensure_dir, path_exists, safe_write};

/// Options for a single push.
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Replace an existing file in a local source
    pub overwrite: bool,
    /// Push to a fresh branch instead of the configured one
    pub review_branch: bool,
    /// Commit message; defaults to `Update <kind> <name>`
    pub message: Option<String>,
}

/// What a push did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// File written into a local source
    Written {
        /// Destination file
        path: PathBuf,
    },
    /// Local destination existed and `overwrite` was not set
    AlreadyExists {
        /// Existing file
        path: PathBuf,
    },
    /// Commit pushed to the configured branch
    Pushed {
        /// Branch that was pushed
        branch: String,
    },
    /// File matched the clone; no commit was made
    NothingToCommit,
    /// Commit pushed to a new review branch
    ReviewBranch {
        /// Branch that was created and pushed
        branch: String,
        /// URL for opening a review against the configured branch
        compare_url: String,
    },
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written {
                path,
            } => write!(f, "wrote {}", path.display()),
            Self::AlreadyExists {
                path,
            } => write!(f, "{} already exists (use --overwrite to replace it)", path.display()),
            Self::Pushed {
                branch,
            } => write!(f, "pushed to {branch}"),
            Self::NothingToCommit => f.write_str("nothing to commit"),
            Self::ReviewBranch {
                branch,
                compare_url,
            } => write!(f, "pushed branch {branch}; open a review at {compare_url}"),
        }
    }
}

/// Name of a review branch for `kind`/`name` created at `at`.
#[must_use]
pub fn review_branch_name(kind: TemplateKind, name: &str, at: DateTime<Utc>) -> String {
    format!("{REVIEW_BRANCH_PREFIX}/{kind}-{name}-{}", at.timestamp_millis())
}

/// Writes templates back into sources.
#[derive(Debug)]
pub struct Publisher<G: GitOps> {
    package_root: PathBuf,
    repos_dir: PathBuf,
    git: G,
}

impl<G: GitOps> Publisher<G> {
    /// Publisher resolving relative local sources against `package_root` and
    /// keeping working clones under `repos_dir`.
    pub fn new(package_root: impl Into<PathBuf>, repos_dir: impl Into<PathBuf>, git: G) -> Self {
        Self {
            package_root: package_root.into(),
            repos_dir: repos_dir.into(),
            git,
        }
    }

    /// Working clone directory for a Git-backed source.
    #[must_use]
    pub fn clone_dir(&self, source: &Source) -> PathBuf {
        self.repos_dir.join(&source.name)
    }

    /// Publish `content` as template `kind`/`name` into `target`.
    pub async fn push(
        &self,
        target: &Source,
        kind: TemplateKind,
        name: &str,
        content: &str,
        options: &PushOptions,
    ) -> Result<PushOutcome> {
        validate_name(name)?;

        match target.kind {
            SourceKind::Local => self.push_local(target, kind, name, content, options).await,
            SourceKind::Git => self.push_git(target, kind, name, content, options).await,
            SourceKind::Registry => Err(AmpError::UnsupportedPushTarget {
                source_name: target.name.clone(),
                kind: target.kind.to_string(),
            }
            .into()),
        }
    }

    async fn push_local(
        &self,
        target: &Source,
        kind: TemplateKind,
        name: &str,
        content: &str,
        options: &PushOptions,
    ) -> Result<PushOutcome> {
        let path = local_templates_root(target, &self.package_root).join(kind.relative_path(name));

        if !options.overwrite && path_exists(&path).await {
            tracing::debug!(target: "ampackage::publish", "{} exists, not overwriting", path.display());
            return Ok(PushOutcome::AlreadyExists {
                path,
            });
        }

        safe_write(&path, content)
            .await
            .with_context(|| format!("Failed to write {kind} '{name}' to source '{}'", target.name))?;
        tracing::debug!(target: "ampackage::publish", "Wrote {}", path.display());
        Ok(PushOutcome::Written {
            path,
        })
    }

    async fn push_git(
        &self,
        target: &Source,
        kind: TemplateKind,
        name: &str,
        content: &str,
        options: &PushOptions,
    ) -> Result<PushOutcome> {
        let repo = self.clone_dir(target);
        let base_branch = target.branch_or_default();

        self.prepare_clone(target, &repo, base_branch).await?;

        let push_branch = if options.review_branch {
            let branch = review_branch_name(kind, name, Utc::now());
            self.git
                .create_branch(&repo, &branch)
                .await
                .with_context(|| format!("Failed to create branch '{branch}' for source '{}'", target.name))?;
            branch
        } else {
            base_branch.to_string()
        };

        let pathspec = clone_pathspec(target, kind, name);
        let file = repo.join(&pathspec);
        safe_write(&file, content)
            .await
            .with_context(|| format!("Failed to write {kind} '{name}' into clone of '{}'", target.name))?;

        self.git
            .add(&repo, &pathspec)
            .await
            .with_context(|| format!("Failed to stage {pathspec} in source '{}'", target.name))?;

        if !self.git.has_staged_changes(&repo).await? {
            tracing::debug!(target: "ampackage::publish", "({}) No changes to commit", target.name);
            if options.review_branch {
                self.return_to_base(target, &repo, base_branch).await?;
                self.git.delete_branch(&repo, &push_branch).await.with_context(|| {
                    format!("Failed to delete branch '{push_branch}' in source '{}'", target.name)
                })?;
            }
            return Ok(PushOutcome::NothingToCommit);
        }

        let message = options.message.clone().unwrap_or_else(|| format!("Update {kind} {name}"));
        self.git
            .commit(&repo, &message)
            .await
            .with_context(|| format!("Failed to commit to source '{}'", target.name))?;
        self.git
            .push(&repo, &push_branch)
            .await
            .with_context(|| format!("Failed to push branch '{push_branch}' of source '{}'", target.name))?;
        tracing::debug!(target: "ampackage::publish", "({}) Pushed {}", target.name, push_branch);

        if options.review_branch {
            self.return_to_base(target, &repo, base_branch).await?;
            return Ok(PushOutcome::ReviewBranch {
                compare_url: compare_url(&target.location, base_branch, &push_branch),
                branch: push_branch,
            });
        }

        Ok(PushOutcome::Pushed {
            branch: push_branch,
        })
    }

    /// Clone if absent, otherwise fetch, check out the base branch and bring it
    /// level with `origin`.
    async fn prepare_clone(&self, target: &Source, repo: &Path, branch: &str) -> Result<()> {
        if path_exists(&repo.join(".git")).await {
            tracing::debug!(target: "ampackage::publish", "({}) Updating {}", target.name, repo.display());
            self.git
                .fetch(repo)
                .await
                .with_context(|| format!("Failed to fetch source '{}'", target.name))?;
            self.git
                .checkout(repo, branch)
                .await
                .with_context(|| format!("Failed to check out '{branch}' in source '{}'", target.name))?;
            self.git
                .reset_to_remote(repo, branch)
                .await
                .with_context(|| format!("Failed to reset '{branch}' for source '{}'", target.name))?;
            self.git
                .pull(repo, branch)
                .await
                .with_context(|| format!("Failed to pull '{branch}' for source '{}'", target.name))?;
        } else {
            tracing::debug!(target: "ampackage::publish", "({}) Cloning into {}", target.name, repo.display());
            ensure_dir(&self.repos_dir).await?;
            self.git
                .clone_repo(&target.location, repo, branch)
                .await
                .with_context(|| format!("Failed to clone source '{}'", target.name))?;
        }
        Ok(())
    }

    async fn return_to_base(&self, target: &Source, repo: &Path, branch: &str) -> Result<()> {
        self.git
            .checkout(repo, branch)
            .await
            .with_context(|| format!("Failed to return to '{branch}' in source '{}'", target.name))
    }
}

/// Path of a template inside a clone, with `/` separators as git expects.
fn clone_pathspec(target: &Source, kind: TemplateKind, name: &str) -> String {
    let file = format!("{}/{}", kind.directory(), kind.file_name(name));
    match target.effective_base_path().map(|b| b.trim_matches('/')).filter(|b| !b.is_empty()) {
        Some(base) => format!("{base}/{file}"),
        None => file,
    }
}
