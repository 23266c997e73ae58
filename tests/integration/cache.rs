//! `ampackage cache` end to end.

use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

fn seed_app_dir(project: &TestProject) {
    let app = project.home.join(".ampackage");
    fs::create_dir_all(app.join("cache/company/components")).unwrap();
    fs::write(app.join("cache/company/components/Button.tsx"), "cached").unwrap();
    fs::create_dir_all(app.join("repos/company")).unwrap();
    fs::write(app.join("repos/company/keep.txt"), "clone").unwrap();
}

#[test]
fn test_cache_clear_one_source() {
    let project = TestProject::new();
    seed_app_dir(&project);

    project
        .command()
        .args(["cache", "clear", "--source", "company"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared cached templates of company"));

    assert!(!project.home.join(".ampackage/cache/company").exists());
    assert!(project.home.join(".ampackage/repos/company/keep.txt").exists());
}

#[test]
fn test_cache_clear_rejects_path_like_source() {
    let project = TestProject::new();
    seed_app_dir(&project);
    let outside = project.scratch("outside");

    project.command().args(["cache", "clear", "--source", ".."]).assert().failure();
    project
        .command()
        .args(["cache", "clear", "--source"])
        .arg(&outside)
        .assert()
        .failure();

    assert!(project.home.join(".ampackage/repos/company/keep.txt").exists());
    assert!(project.home.join(".ampackage/cache/company/components/Button.tsx").exists());
    assert!(outside.exists());
}
