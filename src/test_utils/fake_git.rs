//! In-memory [`GitOps`] implementation for publish tests.
//!
//! The fake keeps just enough state to exercise the publish engine: branches,
//! the current branch, a committed snapshot per path, the index, what each
//! pushed branch holds on the remote, and every call made. `clone_repo` creates the target directory with an empty `.git`
//! so later pushes take the "existing clone" path.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::core::AmpError;
use crate::git::GitOps;

#[derive(Debug, Default)]
struct State {
    calls: Vec<String>,
    branches: Vec<String>,
    current_branch: String,
    committed: BTreeMap<String, String>,
    staged: BTreeMap<String, String>,
    commits: Vec<(String, String)>,
    pushed: Vec<String>,
    remote: BTreeMap<String, BTreeMap<String, String>>,
    fail_on: Option<String>,
}

/// Recording Git fake.
#[derive(Debug, Default)]
pub struct FakeGit {
    state: Mutex<State>,
}

impl FakeGit {
    /// Create an empty fake.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make every later call of `operation` (e.g. `"pull"`) fail.
    pub fn fail_on(&self, operation: &str) {
        self.state().fail_on = Some(operation.to_string());
    }

    /// Stop failing calls.
    pub fn clear_failure(&self) {
        self.state().fail_on = None;
    }

    /// Calls made so far, e.g. `"clone https://... main"`, `"pull main"`.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Branches pushed, in order.
    pub fn pushed_branches(&self) -> Vec<String> {
        self.state().pushed.clone()
    }

    /// `(branch, message)` of every commit, in order.
    pub fn commits(&self) -> Vec<(String, String)> {
        self.state().commits.clone()
    }

    /// Local branches, in creation order.
    pub fn branches(&self) -> Vec<String> {
        self.state().branches.clone()
    }

    /// Branch the clone is on.
    pub fn current_branch(&self) -> String {
        self.state().current_branch.clone()
    }

    fn record(&self, operation: &str, call: String) -> Result<MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(call);
        if state.fail_on.as_deref() == Some(operation) {
            return Err(AmpError::GitCommandError {
                operation: operation.to_string(),
                stderr: format!("simulated {operation} failure"),
            }
            .into());
        }
        Ok(state)
    }
}

#[async_trait]
impl GitOps for FakeGit {
    async fn clone_repo(&self, url: &str, target: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("clone", format!("clone {url} {branch}"))?;
        std::fs::create_dir_all(target.join(".git"))?;
        state.branches = vec![branch.to_string()];
        state.current_branch = branch.to_string();
        Ok(())
    }

    async fn fetch(&self, _repo: &Path) -> Result<()> {
        drop(self.record("fetch", "fetch".to_string())?);
        Ok(())
    }

    async fn checkout(&self, _repo: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("checkout", format!("checkout {branch}"))?;
        if !state.branches.iter().any(|b| b == branch) {
            bail!("pathspec '{branch}' did not match any branch");
        }
        state.current_branch = branch.to_string();
        Ok(())
    }

    async fn pull(&self, _repo: &Path, branch: &str) -> Result<()> {
        drop(self.record("pull", format!("pull {branch}"))?);
        Ok(())
    }

    async fn reset_to_remote(&self, _repo: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("reset", format!("reset origin/{branch}"))?;
        state.committed = state.remote.get(branch).cloned().unwrap_or_default();
        state.staged.clear();
        Ok(())
    }

    async fn create_branch(&self, _repo: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("branch", format!("branch {branch}"))?;
        if state.branches.iter().any(|b| b == branch) {
            bail!("a branch named '{branch}' already exists");
        }
        state.branches.push(branch.to_string());
        state.current_branch = branch.to_string();
        Ok(())
    }

    async fn delete_branch(&self, _repo: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("delete", format!("delete {branch}"))?;
        if state.current_branch == branch {
            bail!("cannot delete branch '{branch}' while it is checked out");
        }
        state.branches.retain(|b| b != branch);
        Ok(())
    }

    async fn add(&self, repo: &Path, pathspec: &str) -> Result<()> {
        let content = std::fs::read_to_string(repo.join(pathspec))?;
        let mut state = self.record("add", format!("add {pathspec}"))?;
        if state.committed.get(pathspec) != Some(&content) {
            state.staged.insert(pathspec.to_string(), content);
        }
        Ok(())
    }

    async fn has_staged_changes(&self, _repo: &Path) -> Result<bool> {
        Ok(!self.state().staged.is_empty())
    }

    async fn commit(&self, _repo: &Path, message: &str) -> Result<()> {
        let mut state = self.record("commit", format!("commit {message}"))?;
        let staged = std::mem::take(&mut state.staged);
        state.committed.extend(staged);
        let branch = state.current_branch.clone();
        state.commits.push((branch, message.to_string()));
        Ok(())
    }

    async fn push(&self, _repo: &Path, branch: &str) -> Result<()> {
        let mut state = self.record("push", format!("push {branch}"))?;
        let snapshot = state.committed.clone();
        state.remote.insert(branch.to_string(), snapshot);
        state.pushed.push(branch.to_string());
        Ok(())
    }
}
