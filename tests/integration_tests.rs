use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn runs_without_arguments() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.assert().success();
}

#[test]
fn searches_bare_path() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("tests/files/feedback.txt");
    cmd.assert()
        .success()
        .stdout(contains("139629729"))
        .stdout(contains("9,8,7,6,5"));
}
