use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn config_show_prints_json() {
    let mut cmd = Command::cargo_bin("itinex").unwrap();
    cmd.args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"limits\""));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itinex.json");

    let mut cmd = Command::cargo_bin("itinex").unwrap();
    cmd.args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());
}

#[test]
fn extract_rejects_missing_input() {
    let mut cmd = Command::cargo_bin("itinex").unwrap();
    cmd.args(["extract", "no-such-file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
