use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn reclaim() -> Command {
    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.env_remove("RECLAIM_CONFIG");
    cmd
}

#[test]
fn shows_help() {
    reclaim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reclaim disk space"));
}

#[test]
fn shows_version() {
    reclaim()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn lists_cleaners() {
    reclaim()
        .args(["--list", "--log-file", "/dev/null"])
        .assert()
        .success()
        .stdout(predicate::str::contains("large-files"))
        .stdout(predicate::str::contains("requires root"))
        .stdout(predicate::str::contains("per-file selection"));
}

#[test]
fn list_respects_disabled_cleaners() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[cleaners]\ndisabled = [\"cargo\"]\n").unwrap();

    reclaim()
        .arg("--list")
        .arg("--config")
        .arg(file.path())
        .args(["--log-file", "/dev/null"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cargo Cache").not());
}

#[test]
fn rejects_bad_config() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[tui]\ntick_rate_ms = 0\n").unwrap();

    reclaim()
        .arg("--list")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_rate_ms"));
}

#[test]
fn prints_completions() {
    reclaim()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reclaim"));
}
