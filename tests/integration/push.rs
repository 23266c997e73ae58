//! `ampackage push` end to end, against local sources and real git remotes.

use ampackage::test_utils::TestGit;
use predicates::prelude::*;
use serde_json::json;

use crate::common::{TestProject, git_available, path_str, with_git_identity};

const BUTTON: &str = "export const Button = () => <button />;\n";

fn project_with_local_target() -> TestProject {
    let project = TestProject::new();
    project.write("src/components/Button.tsx", BUTTON);
    project.write_config(&json!({
        "sources": [
            { "name": "local", "type": "local", "path": "./templates" },
            { "name": "shared", "type": "local", "path": "./shared", "default": true }
        ]
    }));
    project
}

#[test]
fn test_push_to_default_local_source() {
    let project = project_with_local_target();

    project
        .command()
        .args(["push", "component", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pushed component 'Button' to shared"));

    assert_eq!(project.read("shared/components/Button.tsx"), BUTTON);
    assert!(!project.exists("templates/components/Button.tsx"));
}

#[test]
fn test_push_local_respects_overwrite() {
    let project = project_with_local_target();
    project.write("templates/components/Button.tsx", "original\n");

    project
        .command()
        .args(["push", "component", "Button", "--source", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(project.read("templates/components/Button.tsx"), "original\n");

    project.command().args(["push", "component", "Button", "--source", "local", "--overwrite"]).assert().success();
    assert_eq!(project.read("templates/components/Button.tsx"), BUTTON);
}

#[test]
fn test_push_missing_project_file() {
    let project = project_with_local_target();

    project
        .command()
        .args(["push", "hook", "useMissing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("useMissing.ts"));
}

#[test]
fn test_push_to_registry_is_unsupported() {
    let project = TestProject::new();
    project.write("src/utils/format.ts", "export {};\n");
    project.write_config(&json!({
        "sources": [ { "name": "npm", "type": "npm", "url": "@acme/templates" } ]
    }));

    project
        .command()
        .args(["push", "util", "format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not supported"));
}

/// A bare remote seeded with one commit on `main`, configured as source `company`.
fn project_with_git_target() -> (TestProject, TestGit) {
    let project = TestProject::new();
    project.write("src/components/Button.tsx", BUTTON);

    let remote = TestGit::new(project.scratch("remote.git"));
    remote.init_bare().unwrap();

    let seed = TestGit::new(project.scratch("seed"));
    seed.init().unwrap();
    seed.config_user().unwrap();
    seed.write_file("templates/components/Card.tsx", "export const Card = 1;\n").unwrap();
    seed.add_all().unwrap();
    seed.commit("Initial templates").unwrap();
    seed.remote_add("origin", &path_str(remote.repo_path())).unwrap();
    seed.push("origin", "main").unwrap();

    project.write_config(&json!({
        "sources": [
            { "name": "company", "type": "github", "url": path_str(remote.repo_path()), "branch": "main" }
        ]
    }));
    (project, remote)
}

#[test]
fn test_push_to_git_branch() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (project, remote) = project_with_git_target();

    with_git_identity(&mut project.command())
        .args(["push", "component", "Button", "--message", "Add Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on main"));

    assert_eq!(remote.show("main", "templates/components/Button.tsx").unwrap(), BUTTON.trim_end());
    assert_eq!(remote.subject("main").unwrap(), "Add Button");

    with_git_identity(&mut project.command())
        .args(["push", "component", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[test]
fn test_push_review_branch() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (project, remote) = project_with_git_target();

    with_git_identity(&mut project.command())
        .args(["push", "component", "Button", "--pr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ampackage/component-Button-"))
        .stdout(predicate::str::contains("/compare/main...ampackage/component-Button-"));

    let branches = remote.branches().unwrap();
    let review = branches.iter().find(|b| b.starts_with("ampackage/component-Button-")).unwrap();
    assert_eq!(remote.show(review, "templates/components/Button.tsx").unwrap(), BUTTON.trim_end());
    assert_eq!(remote.subject(review).unwrap(), "Update component Button");

    assert!(remote.show("main", "templates/components/Button.tsx").is_err());
    assert_eq!(remote.subject("main").unwrap(), "Initial templates");

    let clone = TestGit::new(project.home.join(".ampackage/repos/company"));
    assert_eq!(clone.current_branch().unwrap(), "main");
}

#[cfg(unix)]
#[test]
fn test_push_retried_after_rejection_reaches_remote() {
    use std::os::unix::fs::PermissionsExt;

    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (project, remote) = project_with_git_target();
    let hook = remote.repo_path().join("hooks/pre-receive");
    std::fs::write(&hook, "#!/bin/sh\necho rejected >&2\nexit 1\n").unwrap();
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755)).unwrap();

    with_git_identity(&mut project.command())
        .args(["push", "component", "Button"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source 'company'"));
    assert!(remote.show("main", "templates/components/Button.tsx").is_err());

    std::fs::remove_file(&hook).unwrap();
    with_git_identity(&mut project.command())
        .args(["push", "component", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on main"));

    assert_eq!(remote.show("main", "templates/components/Button.tsx").unwrap(), BUTTON.trim_end());
}

#[test]
fn test_unchanged_review_push_leaves_no_branch() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (project, remote) = project_with_git_target();

    with_git_identity(&mut project.command()).args(["push", "component", "Button"]).assert().success();
    with_git_identity(&mut project.command())
        .args(["push", "component", "Button", "--pr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit"));

    let clone = TestGit::new(project.home.join(".ampackage/repos/company"));
    assert_eq!(clone.branches().unwrap(), vec!["main"]);
    assert_eq!(remote.branches().unwrap(), vec!["main"]);
}
