//! Real-git fixture helper.
//!
//! Builds small repositories (a bare "remote" plus a seeded working copy) for
//! end-to-end push tests against the system `git` binary.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs git commands inside one repository directory.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    fn run(&self, args: &[&str], action: &str) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| action.to_string())?;

        if !output.status.success() {
            bail!("{} failed: {}", action, String::from_utf8_lossy(&output.stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Helper for the repository at `repo_path` (created if missing).
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Repository directory.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// `git init` with `main` as the initial branch.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.repo_path)?;
        self.run(&["init", "--initial-branch=main"], "Failed to initialize git repository")?;
        Ok(())
    }

    /// `git init --bare` with `main` as HEAD.
    pub fn init_bare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.repo_path)?;
        self.run(&["init", "--bare", "--initial-branch=main"], "Failed to initialize bare repository")?;
        Ok(())
    }

    /// Configure a local commit identity.
    pub fn config_user(&self) -> Result<()> {
        self.run(&["config", "user.email", "test@ampackage.example"], "Failed to configure git user email")?;
        self.run(&["config", "user.name", "Test User"], "Failed to configure git user name")?;
        Ok(())
    }

    /// Write a file relative to the repository root.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.repo_path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Stage everything.
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "."], "Failed to add files to git")?;
        Ok(())
    }

    /// Commit the index.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message], "Failed to create git commit")?;
        Ok(())
    }

    /// Add a remote.
    pub fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["remote", "add", name, url], &format!("Failed to add remote: {name}"))?;
        Ok(())
    }

    /// Push `branch` to `remote`.
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch], &format!("Failed to push {branch} to {remote}"))?;
        Ok(())
    }

    /// Name of the checked-out branch.
    pub fn current_branch(&self) -> Result<String> {
        self.run(&["branch", "--show-current"], "Failed to get current branch name")
    }

    /// Local branch names (works in bare repositories too).
    pub fn branches(&self) -> Result<Vec<String>> {
        let output =
            self.run(&["for-each-ref", "--format=%(refname:short)", "refs/heads"], "Failed to list branches")?;
        Ok(output.lines().map(str::to_string).collect())
    }

    /// Content of `path` at `reference`.
    pub fn show(&self, reference: &str, path: &str) -> Result<String> {
        self.run(&["show", &format!("{reference}:{path}")], &format!("Failed to show {reference}:{path}"))
    }

    /// Commit message subject at `reference`.
    pub fn subject(&self, reference: &str) -> Result<String> {
        self.run(&["log", "-1", "--format=%s", reference], &format!("Failed to read log of {reference}"))
    }
}
