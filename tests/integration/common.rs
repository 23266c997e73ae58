//! Shared fixtures for the integration tests.

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project directory plus an isolated home directory.
pub struct TestProject {
    _temp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let project = temp.path().join("project");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&project).unwrap();
        Self {
            _temp: temp,
            home,
            project,
        }
    }

    /// Directory next to `home` and `project` for extra fixtures.
    pub fn scratch(&self, name: &str) -> PathBuf {
        let path = self.project.parent().unwrap().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Read a file relative to the project directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.project.join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.project.join(relative).exists()
    }

    /// Write `.ampackage.json` into the project directory.
    pub fn write_config(&self, config: &Value) {
        fs::write(self.project.join(".ampackage.json"), serde_json::to_string_pretty(config).unwrap()).unwrap();
    }

    /// Parsed `.ampackage.json` from the home directory.
    pub fn home_config(&self) -> Value {
        let raw = fs::read_to_string(self.home.join(".ampackage.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    /// The binary, run inside the project with an isolated home.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ampackage").unwrap();
        cmd.current_dir(&self.project)
            .env("HOME", &self.home)
            .env("AMPACKAGE_ROOT", &self.project)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Whether a usable `git` binary is on `PATH`.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Environment that gives git commits a fixed identity.
pub fn with_git_identity(cmd: &mut Command) -> &mut Command {
    cmd.env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@ampackage.example")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@ampackage.example")
}

pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}
