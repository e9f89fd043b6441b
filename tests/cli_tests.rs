use assert_cmd::Command;
use predicates::str::{contains, diff};

#[test]
fn runs_feedback_loop() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/feedback.txt")
        .arg("--phases")
        .arg("9,8,7,6,5")
        .arg("--minimal");

    cmd.assert().success().stdout(diff("139629729\n"));
}

#[test]
fn runs_with_status_lines() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/feedback.txt")
        .arg("-p")
        .arg("9,8,7,6,5");

    cmd.assert()
        .success()
        .stdout(contains("Loading"))
        .stdout(contains("phases 9,8,7,6,5"))
        .stdout(contains("139629729"));
}

#[test]
fn searches_feedback_loop() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("search")
        .arg("tests/files/feedback.txt")
        .arg("--minimal");

    cmd.assert()
        .success()
        .stdout(diff("139629729\n9,8,7,6,5\n"));
}

#[test]
fn searches_serial_chain() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("search")
        .arg("tests/files/serial.txt")
        .arg("--serial")
        .arg("--minimal");

    cmd.assert().success().stdout(diff("43210\n4,3,2,1,0\n"));
}

#[test]
fn halt_only_keeps_initial_signal() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/halt.txt")
        .arg("--phases")
        .arg("5")
        .arg("--minimal");

    cmd.assert().success().stdout(diff("0\n"));
}

#[test]
fn traces_amplifiers() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/feedback.txt")
        .arg("--phases")
        .arg("9,8,7,6,5")
        .arg("--minimal")
        .arg("--trace");

    cmd.assert()
        .success()
        .stdout(diff("139629729\n"))
        .stderr(contains("amp #0 @ 16: out"))
        .stderr(contains("amp #4 @ 25: halt, last output 139629729"));
}

#[test]
fn traces_from_environment() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.env("INTCODE_TRACE", "1")
        .arg("run")
        .arg("tests/files/halt.txt")
        .arg("--phases")
        .arg("5")
        .arg("--minimal");

    cmd.assert()
        .success()
        .stderr(contains("amp #0 @ 0: halt, no output"));
}

#[test]
fn trace_disabled_from_environment() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.env("INTCODE_TRACE", "0")
        .arg("run")
        .arg("tests/files/halt.txt")
        .arg("--phases")
        .arg("5")
        .arg("--minimal");

    cmd.assert().success().stderr(diff(""));
}

#[test]
fn checks_program() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("check").arg("tests/files/feedback.txt");
    cmd.assert()
        .success()
        .stdout(contains("loaded 29 integers"));

    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("check").arg("tests/files/bad.txt");
    cmd.assert().failure().stderr(contains("load::bad_int"));
}

#[test]
fn reports_input_starvation() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/starved.txt")
        .arg("--phases")
        .arg("5,6")
        .arg("--minimal");

    cmd.assert()
        .failure()
        .stderr(contains("empty input queue"));
}

#[test]
fn rejects_repeated_phase() {
    let mut cmd = Command::cargo_bin("intcode").unwrap();
    cmd.arg("run")
        .arg("tests/files/feedback.txt")
        .arg("--phases")
        .arg("9,9,7,6,5");

    cmd.assert()
        .failure()
        .stderr(contains("Cannot specify phase '9' twice"));
}
