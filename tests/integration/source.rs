//! `ampackage source` end to end.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_source_add_persists_to_home() {
    let project = TestProject::new();

    project
        .command()
        .args([
            "source",
            "add",
            "company",
            "github",
            "https://github.com/acme/templates.git",
            "--branch",
            "develop",
            "--path",
            "tpl",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added source company"));

    let config = project.home_config();
    let sources = config["sources"].as_array().unwrap();
    let company = sources.iter().find(|s| s["name"] == "company").unwrap();
    assert_eq!(company["type"], "github");
    assert_eq!(company["url"], "https://github.com/acme/templates.git");
    assert_eq!(company["branch"], "develop");
    assert_eq!(company["basePath"], "tpl");
}

#[test]
fn test_source_readd_replaces_in_place() {
    let project = TestProject::new();

    project.command().args(["source", "add", "x", "local", "/a"]).assert().success();
    project.command().args(["source", "add", "y", "local", "/y"]).assert().success();
    project.command().args(["source", "add", "x", "local", "/b"]).assert().success();

    let config = project.home_config();
    let names: Vec<_> = config["sources"].as_array().unwrap().iter().map(|s| s["name"].clone()).collect();
    assert_eq!(names, vec!["local", "x", "y"]);
    assert_eq!(config["sources"][1]["path"], "/b");
}

#[test]
fn test_source_default_flag_moves() {
    let project = TestProject::new();

    project.command().args(["source", "add", "shared", "local", "/shared", "--default"]).assert().success();

    let config = project.home_config();
    let sources = config["sources"].as_array().unwrap();
    let defaults: Vec<_> = sources.iter().filter(|s| s["default"] == true).map(|s| s["name"].clone()).collect();
    assert_eq!(defaults, vec!["shared"]);
}

#[test]
fn test_source_remove() {
    let project = TestProject::new();
    project.command().args(["source", "add", "x", "local", "/a"]).assert().success();

    project
        .command()
        .args(["source", "remove", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed source x"));

    let config = project.home_config();
    assert!(config["sources"].as_array().unwrap().iter().all(|s| s["name"] != "x"));
}

#[test]
fn test_source_remove_missing_fails() {
    let project = TestProject::new();
    project.command().args(["source", "add", "x", "local", "/a"]).assert().success();
    let before = project.home_config();

    project
        .command()
        .args(["source", "remove", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source 'ghost' is not configured"));

    assert_eq!(project.home_config(), before);
}

#[test]
fn test_source_list() {
    let project = TestProject::new();
    project
        .command()
        .args(["source", "add", "company", "git", "https://github.com/acme/templates"])
        .assert()
        .success();

    project
        .command()
        .args(["source", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local (default)"))
        .stdout(predicate::str::contains("company  github https://github.com/acme/templates"));
}

#[test]
fn test_source_add_unknown_kind() {
    let project = TestProject::new();

    project.command().args(["source", "add", "x", "ftp", "ftp://example.com"]).assert().failure();
    assert!(!project.home.join(".ampackage.json").exists());
}
