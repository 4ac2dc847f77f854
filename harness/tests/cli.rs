//! Exit-code and output behavior of the `harness` binary.

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn harness() -> Command {
    Command::new(env!("CARGO_BIN_EXE_harness"))
}

#[test]
fn test_run_builtin_exits_zero() {
    let output = harness().arg("run").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("[       OK ] math_tests.test_sum"));
    assert!(stdout.contains("[       OK ] math_tests.test_diff"));
    assert!(stdout.contains("[  PASSED  ] 2 tests."));
}

#[test]
fn test_run_with_failure_exits_one() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[[case]]\nname = \"bad\"\nop = \"diff\"\na = 1\nb = 2\nexpected = 1"
    )
    .unwrap();

    let output = harness()
        .args(["run", "--cases"])
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("[  FAILED  ] math_tests.bad"));
    assert!(stdout.contains("Which is: -1"));
}

#[test]
fn test_run_json_format() {
    let output = harness()
        .args(["run", "--format", "json", "--filter", "*sum"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["cases"].as_array().unwrap().len(), 1);
    assert_eq!(value["cases"][0]["name"], "test_sum");
    assert_eq!(value["cases"][0]["outcome"]["actual"], 3);
}

#[test]
fn test_invalid_filter_exits_two() {
    let output = harness()
        .args(["run", "--filter", "["])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_list_cases() {
    let output = harness().arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("math_tests.\n"));
    assert!(stdout.contains("  test_sum  # sum(1, 2) == 3"));
    assert!(stdout.contains("  test_diff  # diff(1, 2) == -1"));
}

#[test]
fn test_eval_negative_operands() {
    let output = harness()
        .args(["eval", "--op", "diff", "-5", "-7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "diff(-5, -7) = 2\n");
}

#[test]
fn test_eval_checked_overflow() {
    let output = harness()
        .args(["eval", "--op", "sum", "--checked", "9223372036854775807", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let wrapped = harness()
        .args(["eval", "--op", "sum", "9223372036854775807", "1"])
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8(wrapped.stdout).unwrap(),
        "sum(9223372036854775807, 1) = -9223372036854775808\n"
    );
}

#[test]
fn test_config_file_overridden_by_flags() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "include_builtin = false").unwrap();
    let mut cases = NamedTempFile::new().unwrap();
    writeln!(
        cases,
        "[[case]]\nname = \"only\"\nop = \"sum\"\na = 2\nb = 2\nexpected = 4"
    )
    .unwrap();

    let output = harness()
        .args(["run", "--config"])
        .arg(config.path())
        .arg("--cases")
        .arg(cases.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("[       OK ] math_tests.only"));
    assert!(!stdout.contains("test_sum"));
}

#[test]
fn test_config_file_without_cases_exits_two() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "include_builtin = false").unwrap();

    let output = harness()
        .args(["run", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
