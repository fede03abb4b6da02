use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_coursescout_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("coursescout")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_help_lists_options() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Alura catalog"))
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("--headless"))
        .stdout(predicate::str::contains("--fixture"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_fixture_run_prints_report() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--fixture").arg(fixture("course-page.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "COURSE SUCCESSFULLY INSERTED INTO THE IN-MEMORY STORE!",
        ))
        .stdout(predicate::str::contains("Course ID: 1"))
        .stdout(predicate::str::contains(
            "Title: Formação Modelagem e Melhorias de Processos de Negócios",
        ))
        .stdout(predicate::str::contains("Instructor: Marina Costa\n"))
        .stdout(predicate::str::contains("Workload: 48 hours"))
        .stdout(predicate::str::contains(
            "Description: Aprenda a mapear, analisar e melhorar processos de negócio.\n",
        ));
}

#[test]
fn test_fixture_run_json_output() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--fixture")
        .arg(fixture("course-page.json"))
        .arg("--query")
        .arg("Course A")
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "Course A");
    assert_eq!(json["instructor"], "Marina Costa");
    assert_eq!(json["duration_hours"], "48");
}

#[test]
fn test_logs_stay_off_stdout() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--fixture")
        .arg(fixture("course-page.json"))
        .arg("--format")
        .arg("json")
        .arg("--verbose");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("Stored course with id 1"));
}

#[test]
fn test_without_chrome() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--chrome-path").arg("/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Chrome not found"));
}

#[test]
fn test_chrome_path_from_env() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.env("COURSESCOUT_CHROME", "/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/chrome"));
}

#[test]
fn test_missing_fixture_file() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--fixture").arg(fixture("does-not-exist.json"));

    cmd.assert().failure().stdout(predicate::str::is_empty());
}

#[test]
fn test_malformed_fixture_file() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--fixture").arg(fixture("broken-page.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page fixture"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let mut cmd = Command::new(get_coursescout_bin());
    cmd.arg("--format").arg("table");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
