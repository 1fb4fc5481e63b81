//! Binary tests driven by a saved registry dump.

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE: &str = "tests/fixtures/lsregister_sample.txt";

fn uti() -> Command {
    let mut cmd = Command::cargo_bin("uti").unwrap();
    cmd.args(["--from-file", SAMPLE, "-q"]);
    cmd
}

#[test]
fn dump_lists_content_types_only() {
    uti()
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("public.plain-text"))
        .stdout(predicate::str::contains("com.adobe.pdf"))
        .stdout(predicate::str::contains("macbook").not())
        .stdout(predicate::str::contains("app-category").not());
}

#[test]
fn dump_by_app_json_is_valid() {
    let output = uti().args(["dump", "--by-app", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let preview = &value["Preview"]["utis"];
    assert_eq!(preview[0]["uti"], "com.adobe.pdf");
    assert!(value.get("CoreTypes").is_some());
}

#[test]
fn ext_accepts_bare_extension() {
    uti()
        .args(["ext", "MD"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("net.daringfireball.markdown\n"))
        .stdout(predicate::str::contains("https://daringfireball.net/projects/markdown/"));
}

#[test]
fn ext_queries_sharing_a_type_print_it_once() {
    let output = uti().args(["ext", "txt", "text"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("public.plain-text\n").count(), 1);
}

#[test]
fn mime_query_reports_parents() {
    uti()
        .args(["mime", "application/pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public.composite-content"));
}

#[test]
fn unknown_identifier_is_reported_not_fatal() {
    uti()
        .args(["info", "com.example.none"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "No information available for com.example.none",
        ));
}

#[test]
fn registry_summary_goes_to_stderr() {
    Command::cargo_bin("uti")
        .unwrap()
        .args(["--from-file", SAMPLE, "info", "public.plain-text"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded 3 types from 7 records"))
        .stdout(predicate::str::contains("Loaded").not());
}

#[test]
fn quiet_hides_registry_summary() {
    uti()
        .args(["info", "public.plain-text"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded").not());
}

#[test]
fn missing_dump_file_fails() {
    Command::cargo_bin("uti")
        .unwrap()
        .args(["--from-file", "tests/fixtures/does-not-exist.txt", "dump"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

#[test]
fn subcommand_is_required() {
    Command::cargo_bin("uti").unwrap().assert().failure();
}
