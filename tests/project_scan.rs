use std::fs;
use std::path::Path;

use devstack_dashboard::scanner::{scan_projects, BOOTSTRAP_MARKER, MANIFEST, PUBLIC_ENTRY};

fn make_project(base: &Path, name: &str, manifest: Option<&str>) {
    let dir = base.join(name);
    fs::create_dir_all(dir.join("public")).unwrap();
    fs::write(dir.join(BOOTSTRAP_MARKER), "#!/usr/bin/env php\n").unwrap();
    fs::write(dir.join(PUBLIC_ENTRY), "<?php\n").unwrap();
    if let Some(contents) = manifest {
        fs::write(dir.join(MANIFEST), contents).unwrap();
    }
}

#[test]
fn skips_directories_without_both_markers() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();

    // bootstrap script but no public entry point
    let only_marker = base.join("only-marker");
    fs::create_dir_all(&only_marker).unwrap();
    fs::write(only_marker.join(BOOTSTRAP_MARKER), "").unwrap();

    // public entry point but no bootstrap script
    let only_entry = base.join("only-entry");
    fs::create_dir_all(only_entry.join("public")).unwrap();
    fs::write(only_entry.join(PUBLIC_ENTRY), "").unwrap();

    // loose files are not candidates at all
    fs::write(base.join(".DS_Store"), "").unwrap();

    assert!(scan_projects(base).unwrap().is_empty());
}

#[test]
fn collects_metadata_with_fallbacks() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();

    make_project(
        base,
        "projA",
        Some(r#"{"require":{"laravel/framework":"^10.0"},"description":"Demo"}"#),
    );
    make_project(base, "projB", None);
    fs::create_dir_all(base.join("notAProject")).unwrap();

    let projects = scan_projects(base).unwrap();
    assert_eq!(projects.len(), 2);

    let a = projects.iter().find(|p| p.name == "projA").unwrap();
    assert_eq!(a.version, "10.0");
    assert_eq!(a.description, "Demo");
    assert_eq!(a.url, "/projA/");
    assert_eq!(a.path, base.join("projA").display().to_string());

    // no manifest: defaults apply, timestamp falls back to the directory
    let b = projects.iter().find(|p| p.name == "projB").unwrap();
    assert_eq!(b.version, "Unknown");
    assert_eq!(b.description, "");
    assert!(b.last_modified > 0);
}

#[test]
fn malformed_manifest_does_not_abort_the_scan() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();

    make_project(base, "broken", Some("{ this is not json"));
    make_project(
        base,
        "healthy",
        Some(r#"{"require":{"laravel/framework":"~9.5"}}"#),
    );

    let projects = scan_projects(base).unwrap();
    assert_eq!(projects.len(), 2);

    let broken = projects.iter().find(|p| p.name == "broken").unwrap();
    assert_eq!(broken.version, "Unknown");
    assert_eq!(broken.description, "");

    let healthy = projects.iter().find(|p| p.name == "healthy").unwrap();
    assert_eq!(healthy.version, "9.5");
}

#[test]
fn orders_newest_manifest_first() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();

    for name in ["alpha", "beta", "gamma"] {
        make_project(base, name, Some("{}"));
    }

    let projects = scan_projects(base).unwrap();
    assert_eq!(projects.len(), 3);
    for pair in projects.windows(2) {
        assert!(pair[0].last_modified >= pair[1].last_modified);
    }

    // all three manifests were written within the same second, so the
    // stable sort must keep the name-ordered discovery sequence
    if projects.iter().all(|p| p.last_modified == projects[0].last_modified) {
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }
}

#[test]
fn missing_base_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(scan_projects(&tmp.path().join("does-not-exist")).is_err());
}
