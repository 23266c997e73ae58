//! `ampackage list` end to end.

use predicates::prelude::*;
use serde_json::json;

use crate::common::TestProject;

#[test]
fn test_list_default_source() {
    let project = TestProject::new();
    project.write("templates/components/Button.tsx", "");
    project.write("templates/hooks/useAuth.ts", "");
    project.write("templates/utils/format.ts", "");
    project.write("templates/components/notes.md", "");

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Button"))
        .stdout(predicate::str::contains("- useAuth"))
        .stdout(predicate::str::contains("- format"))
        .stdout(predicate::str::contains("notes").not());
}

#[test]
fn test_list_merges_sources() {
    let project = TestProject::new();
    project.write("a/components/Button.tsx", "");
    project.write("b/components/Button.tsx", "");
    project.write("b/components/Card.tsx", "");
    project.write_config(&json!({
        "sources": [
            { "name": "a", "type": "local", "path": "./a" },
            { "name": "b", "type": "local", "path": "./b" }
        ]
    }));

    let output = project.command().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("- Button").count(), 1);
    assert!(stdout.contains("- Card"));
}

#[test]
fn test_list_skips_failing_sources() {
    let project = TestProject::new();
    project.write("templates/components/Button.tsx", "");
    project.write_config(&json!({
        "sources": [
            { "name": "registry", "type": "npm", "url": "@acme/templates" },
            { "name": "local", "type": "local", "path": "./templates" }
        ]
    }));

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Button"))
        .stderr(predicate::str::contains("registry"));
}

#[test]
fn test_list_single_source() {
    let project = TestProject::new();
    project.write("a/components/Button.tsx", "");
    project.write("b/components/Card.tsx", "");
    project.write_config(&json!({
        "sources": [
            { "name": "a", "type": "local", "path": "./a" },
            { "name": "b", "type": "local", "path": "./b" }
        ]
    }));

    project
        .command()
        .args(["list", "--source", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Card"))
        .stdout(predicate::str::contains("Button").not());

    project.command().args(["list", "--source", "c"]).assert().failure();
}
