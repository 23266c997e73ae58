//! Type-safe Git command builder for consistent command execution
//!
//! Every Git invocation in ampackage goes through [`GitCommand`], so timeouts,
//! logging and the mapping of failures onto [`AmpError`] stay uniform.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::AmpError;

/// Fluent builder for a single `git` process.
///
/// # Examples
///
/// ```rust,no_run
/// use ampackage::git::command_builder::GitCommand;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let staged = GitCommand::staged_files()
///     .current_dir(Path::new("/path/to/repo"))
///     .execute_stdout()
///     .await?;
/// println!("staged: {staged}");
///
/// GitCommand::clone("https://github.com/acme/templates.git", "/tmp/clone", Some("main"))
///     .with_timeout(Some(std::time::Duration::from_secs(60)))
///     .with_context("company")
///     .execute_success()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// New commands capture output and time out after 5 minutes.
pub struct GitCommand {
    args: Vec<String>,
    current_dir: Option<std::path::PathBuf>,
    timeout_duration: Option<Duration>,
    /// Label included in log lines (typically the source name)
    context: Option<String>,
    /// For clone commands, the URL reported in [`AmpError::GitCloneFailed`]
    clone_url: Option<String>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            current_dir: None,
            timeout_duration: Some(Duration::from_secs(300)),
            context: None,
            clone_url: None,
        }
    }
}

impl GitCommand {
    /// Creates a new Git command builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the command against `dir` (passed to git as `-C <dir>`).
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a custom timeout for the command (None for no timeout)
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Set a context for logging (e.g., source name)
    ///
    /// ```text
    /// (company) Executing command: git -C /home/me/.ampackage/repos/company fetch origin --prune
    /// ```
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn full_args(&self) -> Vec<String> {
        let mut full_args = Vec::with_capacity(self.args.len() + 2);
        if let Some(ref dir) = self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());
        full_args
    }

    /// The git subcommand, skipping a leading `-C <dir>`.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    fn log_label(&self) -> String {
        self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default()
    }

    /// Execute the command and return the output
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let start = std::time::Instant::now();
        let full_args = self.full_args();
        let label = self.log_label();

        let mut cmd = Command::new("git");
        cmd.args(&full_args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(target: "git", "{}Executing command: git {}", label, full_args.join(" "));

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result.with_context(|| format!("Failed to execute git {}", full_args.join(" ")))?
            } else {
                tracing::warn!(
                    target: "git",
                    "{}Command timed out after {} seconds: git {}",
                    label,
                    duration.as_secs(),
                    full_args.join(" ")
                );
                return Err(AmpError::GitCommandError {
                    operation: self.operation(),
                    stderr: format!(
                        "Git command timed out after {} seconds. This may indicate:\n\
                        - Network connectivity issues\n\
                        - Authentication prompts waiting for input\n\
                        Try running the command manually: git {}",
                        duration.as_secs(),
                        full_args.join(" ")
                    ),
                }
                .into());
            }
        } else {
            output_future
                .await
                .with_context(|| format!("Failed to execute git {}", full_args.join(" ")))?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "{}Command failed with exit code: {:?}",
                label,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "{}Error: {}", label, stderr.trim());
            }

            let detail = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            let error = if self.args.first().is_some_and(|arg| arg == "clone") {
                AmpError::GitCloneFailed {
                    url: self.clone_url.unwrap_or_else(|| "unknown".to_string()),
                    reason: detail,
                }
            } else {
                AmpError::GitCommandError {
                    operation: self.operation(),
                    stderr: detail,
                }
            };
            return Err(error.into());
        }

        if !stdout.trim().is_empty() {
            tracing::debug!(target: "git", "{}{}", label, stdout.trim());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(target: "git", "{}{}", label, stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "git::perf",
                "{}Git {} took {:.2}s",
                label,
                self.operation(),
                elapsed.as_secs_f64()
            );
        } else if elapsed.as_millis() > 100 {
            tracing::debug!(
                target: "git::perf",
                "{}Git {} took {}ms",
                label,
                self.operation(),
                elapsed.as_millis()
            );
        }

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Execute the command and return only stdout as a trimmed string
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Execute the command, discarding its output
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Output from a Git command
#[derive(Debug)]
pub struct GitCommandOutput {
    /// Standard output from the Git command
    pub stdout: String,
    /// Standard error output from the Git command
    pub stderr: String,
}

// Convenience builders for the operations the publish engine needs

impl GitCommand {
    /// Create a clone command, optionally checking out `branch`
    pub fn clone(url: &str, target: impl AsRef<Path>, branch: Option<&str>) -> Self {
        let mut cmd = Self::new();
        cmd.args.push("clone".to_string());
        if let Some(branch) = branch {
            cmd.args.push("--branch".to_string());
            cmd.args.push(branch.to_string());
        }
        cmd.args.push(url.to_string());
        cmd.args.push(target.as_ref().display().to_string());
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    /// Create a fetch command for `origin`
    pub fn fetch() -> Self {
        Self::new().args(["fetch", "origin", "--prune"])
    }

    /// Create a checkout command
    pub fn checkout(ref_name: &str) -> Self {
        Self::new().args(["checkout", ref_name])
    }

    /// Create a command that creates and switches to a new branch
    pub fn create_branch(branch_name: &str) -> Self {
        Self::new().args(["checkout", "-b", branch_name])
    }

    /// Create a pull command for one branch of `origin`
    pub fn pull(branch: &str) -> Self {
        Self::new().args(["pull", "--ff-only", "origin", branch])
    }

    /// Create a hard reset of the current branch to `target`
    pub fn reset_hard(target: &str) -> Self {
        Self::new().args(["reset", "--hard", target])
    }

    /// Create a command that force-deletes a local branch
    pub fn delete_branch(branch_name: &str) -> Self {
        Self::new().args(["branch", "-D", branch_name])
    }

    /// Create an add command
    pub fn add(pathspec: &str) -> Self {
        Self::new().args(["add", "--", pathspec])
    }

    /// List staged paths; empty output means nothing to commit
    pub fn staged_files() -> Self {
        Self::new().args(["diff", "--cached", "--name-only"])
    }

    /// Create a commit command
    pub fn commit(message: &str) -> Self {
        Self::new().args(["commit", "-m", message])
    }

    /// Create a push command that sets upstream for `branch`
    pub fn push(branch: &str) -> Self {
        Self::new().args(["push", "--set-upstream", "origin", branch])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_args_prefix_current_dir() {
        let cmd = GitCommand::reset_hard("origin/main").current_dir("/tmp/repo");
        assert_eq!(cmd.full_args(), vec!["-C", "/tmp/repo", "reset", "--hard", "origin/main"]);
        assert_eq!(cmd.operation(), "reset");
    }

    #[test]
    fn test_clone_records_url() {
        let cmd = GitCommand::clone("https://github.com/acme/t.git", "/tmp/t", Some("main"));
        assert_eq!(cmd.clone_url.as_deref(), Some("https://github.com/acme/t.git"));
        assert_eq!(cmd.args, vec!["clone", "--branch", "main", "https://github.com/acme/t.git", "/tmp/t"]);
        assert_eq!(cmd.operation(), "clone");
    }

    #[test]
    fn test_log_label() {
        assert_eq!(GitCommand::fetch().log_label(), "");
        assert_eq!(GitCommand::fetch().with_context("company").log_label(), "(company) ");
    }

    #[tokio::test]
    async fn test_failed_command_maps_to_git_error() {
        if which::which("git").is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = GitCommand::new()
            .args(["rev-parse", "--verify", "definitely-not-a-ref"])
            .current_dir(dir.path())
            .execute()
            .await
            .unwrap_err();

        let amp = err.downcast_ref::<AmpError>().expect("typed git error");
        assert!(matches!(amp, AmpError::GitCommandError { operation, .. } if operation == "rev-parse"));
    }
}
