// Command-line behaviour of the `percolation-stats` binary

use assert_cmd::Command;
use predicates::prelude::*;

fn percolation_stats() -> Command {
    Command::cargo_bin("percolation-stats").unwrap()
}

#[test]
fn prints_four_labelled_lines() {
    let output = percolation_stats()
        .args(["--seed", "3"])
        .write_stdin("5 10\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("time                    = "))
        .stdout(predicate::str::contains("\nmean                    = "))
        .stdout(predicate::str::contains("\nstddev                  = "))
        .stdout(predicate::str::contains("\n95% confidence interval = "))
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 4);
}

#[test]
fn non_positive_sizes_exit_non_zero() {
    percolation_stats()
        .write_stdin("0 10")
        .assert()
        .code(predicate::ne(0))
        .stderr(predicate::str::contains("n must be positive"));

    percolation_stats()
        .write_stdin("10 -2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("trials must be positive"));
}

#[test]
fn unknown_log_level_exits_non_zero() {
    percolation_stats()
        .args(["--log-level", "loud"])
        .write_stdin("5 10")
        .assert()
        .failure();
}

#[test]
fn json_summary_is_written_for_a_single_trial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("summary.json");

    percolation_stats()
        .args(["--seed", "4", "--json"])
        .arg(&path)
        .write_stdin("6 1")
        .assert()
        .success()
        .stdout(predicate::str::contains("stddev                  = NaN"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["trials"], 1);
    assert_eq!(json["seed"], 4);
    assert!(json["stddev"].is_null());
}
