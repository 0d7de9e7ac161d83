use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("timewheel");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("timewheel"))
        .stdout(contains("--min"));
}

#[test]
fn rejects_malformed_start_time() {
    let mut cmd = cargo::cargo_bin_cmd!("timewheel");
    cmd.args(["--start", "7h30"])
        .assert()
        .failure()
        .stderr(contains("expected HH:MM"));
}

#[test]
fn reports_bad_config_before_opening_the_terminal() {
    let mut cmd = cargo::cargo_bin_cmd!("timewheel");
    cmd.args(["--config", r#"{"start":"31:00"}"#])
        .assert()
        .failure()
        .stderr(contains("invalid start time"));
}

#[test]
fn reports_unknown_line_color() {
    let mut cmd = cargo::cargo_bin_cmd!("timewheel");
    cmd.args(["--line-color", "sparkly"])
        .assert()
        .failure()
        .stderr(contains("unknown color"));
}
