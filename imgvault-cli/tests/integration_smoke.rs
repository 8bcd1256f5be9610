//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_put_help() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("put").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Image file to store"));
}

#[test]
fn test_get_help() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("get").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Name of the stored image"));
}

#[test]
fn test_rm_help() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("rm").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Name of the stored image"));
}

#[test]
fn test_ls_help() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("ls").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Table name"));
}

#[test]
fn test_put_requires_file_argument() {
    let mut cmd = Command::cargo_bin("imgvault").unwrap();
    cmd.arg("put");

    cmd.assert().failure();
}
