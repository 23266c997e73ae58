//! `ampackage add` end to end.

use predicates::prelude::*;
use serde_json::json;

use crate::common::TestProject;

const BUTTON: &str = "export function Button() {\n  return <button />;\n}\n";

fn project_with_button() -> TestProject {
    let project = TestProject::new();
    project.write("templates/components/Button.tsx", BUTTON);
    project
}

#[test]
fn test_add_from_default_source() {
    let project = project_with_button();

    project
        .command()
        .args(["add", "component", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added component 'Button'"));

    assert_eq!(project.read("src/components/Button.tsx"), BUTTON);
}

#[test]
fn test_add_several_names_with_dest() {
    let project = TestProject::new();
    project.write("templates/hooks/useAuth.ts", "export const useAuth = () => null;\n");
    project.write("templates/hooks/useFetch.ts", "export const useFetch = () => null;\n");

    project.command().args(["add", "hook", "useAuth", "useFetch", "--dest", "app/lib"]).assert().success();

    assert!(project.exists("app/lib/hooks/useAuth.ts"));
    assert!(project.exists("app/lib/hooks/useFetch.ts"));
    assert!(!project.exists("src"));
}

#[test]
fn test_add_existing_without_overwrite() {
    let project = project_with_button();
    project.write("src/components/Button.tsx", "edited locally\n");

    project
        .command()
        .args(["add", "component", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(project.read("src/components/Button.tsx"), "edited locally\n");
}

#[test]
fn test_add_existing_with_overwrite() {
    let project = project_with_button();
    project.write("src/components/Button.tsx", "edited locally\n");

    project.command().args(["add", "component", "Button", "--overwrite"]).assert().success();

    assert_eq!(project.read("src/components/Button.tsx"), BUTTON);
}

#[test]
fn test_add_missing_template_fails() {
    let project = project_with_button();

    project
        .command()
        .args(["add", "component", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch component 'Missing'"))
        .stderr(predicate::str::contains("Failed to add template: Missing"));
}

#[test]
fn test_add_continues_after_a_failure() {
    let project = project_with_button();

    project.command().args(["add", "component", "Missing", "Button"]).assert().failure();

    assert_eq!(project.read("src/components/Button.tsx"), BUTTON);
}

#[test]
fn test_add_prefers_earlier_source() {
    let project = TestProject::new();
    project.write("first/components/Button.tsx", "first\n");
    project.write("second/components/Button.tsx", "second\n");
    project.write("second/components/Card.tsx", "card\n");
    project.write_config(&json!({
        "sources": [
            { "name": "first", "type": "local", "path": "./first" },
            { "name": "second", "type": "local", "path": "./second" }
        ]
    }));

    project
        .command()
        .args(["add", "component", "Button", "Card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from second"));

    assert_eq!(project.read("src/components/Button.tsx"), "first\n");
    assert_eq!(project.read("src/components/Card.tsx"), "card\n");
}

#[test]
fn test_add_from_named_source() {
    let project = TestProject::new();
    project.write("first/components/Button.tsx", "first\n");
    project.write("second/components/Button.tsx", "second\n");
    project.write_config(&json!({
        "sources": [
            { "name": "first", "type": "local", "path": "./first" },
            { "name": "second", "type": "local", "path": "./second" }
        ]
    }));

    project.command().args(["add", "component", "Button", "--source", "second"]).assert().success();
    assert_eq!(project.read("src/components/Button.tsx"), "second\n");

    project
        .command()
        .args(["add", "component", "Button", "--source", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source 'nope' is not configured"));
}

#[test]
fn test_add_rejects_path_names() {
    let project = project_with_button();

    project
        .command()
        .args(["add", "component", "../Button"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template name"));
}

#[test]
fn test_unparsable_config_falls_back_to_defaults() {
    let project = project_with_button();
    project.write(".ampackage.json", "{ not json");

    project
        .command()
        .args(["add", "component", "Button"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"));

    assert_eq!(project.read("src/components/Button.tsx"), BUTTON);
}
