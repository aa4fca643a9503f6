//! CLI integration tests for pyxis.
//!
//! These tests verify the hook commands end to end. Tests that need a real
//! Python interpreter, cython, and a C compiler are ignored by default.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the pyxis binary command.
fn pyxis() -> Command {
    Command::cargo_bin("pyxis").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Lay out a small Cython project with one nested package.
fn write_sample_project(root: &std::path::Path) {
    fs::write(
        root.join("pyproject.toml"),
        r#"[project]
name = "demo"
version = "0.1.0"

[tool.pyxis.cython]
language = "c"

[tool.pyxis.cython.compiler_directives]
language_level = "3"
"#,
    )
    .unwrap();

    let pkg = root.join("demo");
    fs::create_dir_all(pkg.join("core")).unwrap();
    fs::write(pkg.join("__init__.pyx"), "VERSION = \"0.1.0\"\n").unwrap();
    fs::write(pkg.join("core/__init__.pyx"), "").unwrap();
    fs::write(
        pkg.join("core/base.pyx"),
        "def add(int a, int b):\n    return a + b\n",
    )
    .unwrap();
}

// ============================================================================
// pyxis --help / completions
// ============================================================================

#[test]
fn test_help_lists_hooks() {
    pyxis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build-wheel"))
        .stdout(predicate::str::contains("build-editable"));
}

#[test]
fn test_completions_bash() {
    pyxis()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pyxis"));
}

// ============================================================================
// pyxis build-wheel
// ============================================================================

#[test]
fn test_build_wheel_fails_in_empty_directory() {
    let tmp = temp_dir();

    pyxis()
        .args(["build-wheel"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
#[ignore] // Requires python3, cython, and a C compiler
fn test_build_wheel_produces_one_wheel() {
    let tmp = temp_dir();
    write_sample_project(tmp.path());

    pyxis()
        .args(["build-wheel", "--out-dir", "dist"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".whl"));

    let wheels: Vec<_> = fs::read_dir(tmp.path().join("dist"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "whl"))
        .collect();
    assert_eq!(wheels.len(), 1);
}

#[test]
#[ignore] // Requires python3, cython, and a C compiler
fn test_plan_lists_nested_modules() {
    let tmp = temp_dir();
    write_sample_project(tmp.path());

    pyxis()
        .args(["build-wheel", "--plan"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo.core.base"))
        .stdout(predicate::str::contains("demo.core"));
}

// ============================================================================
// pyxis build-editable
// ============================================================================

#[test]
#[ignore] // Requires python3, cython, and a C compiler
fn test_build_editable_leaves_artifacts_in_place() {
    let tmp = temp_dir();
    write_sample_project(tmp.path());

    pyxis()
        .args(["build-editable", "--out-dir", "dist"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".whl"));

    // The compiled module stays beside its source.
    let compiled: Vec<_> = fs::read_dir(tmp.path().join("demo/core"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .ends_with(std::env::consts::DLL_SUFFIX)
        })
        .collect();
    assert!(!compiled.is_empty());
}
