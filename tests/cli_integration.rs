//! Integration tests for the credstore CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords are supplied through `CREDSTORE_PASSWORD` or piped stdin
//! so no test needs a terminal.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the credstore binary with a clean
/// environment for the variables it reads.
fn credstore() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credstore").expect("binary should exist");
    for var in [
        "CREDSTORE_FILE",
        "CREDSTORE_FORMAT",
        "CREDSTORE_METHOD",
        "CREDSTORE_PASSWORD",
        "CREDSTORE_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_flag_shows_usage() {
    credstore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("htpasswd"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("passwd"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("schemes"));
}

#[test]
fn version_flag_shows_version() {
    credstore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credstore"));
}

#[test]
fn no_args_shows_help() {
    credstore()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_without_configured_file_fails() {
    let tmp = TempDir::new().unwrap();
    credstore()
        .arg("list")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn bogus_format_is_rejected() {
    let tmp = TempDir::new().unwrap();
    credstore()
        .args(["list", "--file", "passwd", "--format", "bogus"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
    tmp.child("passwd").assert(predicate::path::missing());
}

#[test]
fn plain_add_check_list_delete() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.child("passwd");
    db.write_str("bob:b0b\n").unwrap();
    let file = db.path().to_str().unwrap();

    credstore()
        .args(["add", "alice", "--extra", "Alice A", "--file", file])
        .env("CREDSTORE_PASSWORD", "4l1c3")
        .assert()
        .success();
    db.assert("bob:b0b\nalice:4l1c3:Alice A\n");

    credstore()
        .args(["check", "alice", "--file", file])
        .env("CREDSTORE_PASSWORD", "4l1c3")
        .assert()
        .success();

    credstore()
        .args(["check", "alice", "--file", file])
        .env("CREDSTORE_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication failed"));

    credstore()
        .args(["list", "--file", file])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("Alice A"));

    credstore()
        .args(["delete", "bob", "--force", "--file", file])
        .assert()
        .success();
    db.assert("alice:4l1c3:Alice A\n");
}

#[test]
fn add_existing_user_fails() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.child("passwd");
    db.write_str("bob:b0b\n").unwrap();

    credstore()
        .args(["add", "bob", "--file", db.path().to_str().unwrap()])
        .env("CREDSTORE_PASSWORD", "other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    db.assert("bob:b0b\n");
}

#[test]
fn htpasswd_from_config_file_with_piped_password() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".credstore.toml")
        .write_str("path = \"users.htpasswd\"\nformat = \"htpasswd\"\nmethod = \"argon2\"\n")
        .unwrap();

    credstore()
        .args(["add", "carol"])
        .current_dir(tmp.path())
        .write_stdin("c4r0l\n")
        .assert()
        .success();

    tmp.child("users.htpasswd")
        .assert(predicate::str::starts_with("carol:$argon2id$"));

    credstore()
        .args(["check", "carol"])
        .current_dir(tmp.path())
        .write_stdin("c4r0l\n")
        .assert()
        .success();

    credstore()
        .args(["passwd", "carol"])
        .current_dir(tmp.path())
        .write_stdin("n3w-pass\n")
        .assert()
        .success();

    credstore()
        .args(["check", "carol"])
        .current_dir(tmp.path())
        .write_stdin("c4r0l\n")
        .assert()
        .failure();
}

#[test]
fn schemes_lists_argon2() {
    credstore()
        .arg("schemes")
        .assert()
        .success()
        .stdout(predicate::str::contains("argon2"));
}

#[test]
fn completions_for_bash() {
    credstore()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credstore"));
}
