//! End-to-end tests for the `credsweep` binary.

#![expect(clippy::expect_used, reason = "tests use expect for clearer failure messages")]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn credsweep() -> Command {
    Command::new(env!("CARGO_BIN_EXE_credsweep"))
}

fn openai_key() -> String {
    format!("sk-{}", "a1B2c3D4e5".repeat(4))
}

#[test]
fn exit_zero_when_no_credentials() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("clean.py"), "print('hello')").unwrap();

    credsweep().args(["scan", "."]).current_dir(dir.path()).assert().success();
}

#[test]
fn exit_one_when_credentials_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leak.env"), format!("OPENAI_API_KEY={}", openai_key())).unwrap();

    credsweep().args(["scan", "."]).current_dir(dir.path()).assert().code(1);
}

#[test]
fn exit_zero_flag_overrides_findings() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leak.env"), format!("OPENAI_API_KEY={}", openai_key())).unwrap();

    credsweep()
        .args(["scan", ".", "--exit-zero"])
        .current_dir(dir.path())
        .assert()
        .success();
}

#[test]
fn scan_nonexistent_path_is_an_error() {
    credsweep()
        .args(["scan", "/nonexistent/path/that/does/not/exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn json_output_masks_the_credential() {
    let dir = TempDir::new().unwrap();
    let key = openai_key();
    fs::write(dir.path().join("leak.py"), format!("key = \"{key}\"")).unwrap();

    let output = credsweep()
        .args(["scan", ".", "--format", "json", "--exit-zero"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("stdout is UTF-8");
    assert!(!stdout.contains(&key), "raw credential leaked into output");

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON report");
    assert_eq!(report["summary"]["total_detections"], 1);
    assert_eq!(report["findings"][0]["provider"], "OpenAI");
    assert_eq!(report["findings"][0]["source"], "leak.py");

    let masked = report["findings"][0]["masked_value"].as_str().expect("masked value");
    assert!(masked.contains("..."));
    assert!(masked.starts_with("sk-"));
}

#[test]
fn empty_directory_still_emits_json_report() {
    let dir = TempDir::new().unwrap();

    let output = credsweep()
        .args(["scan", ".", "--format", "json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON report");
    assert_eq!(report["summary"]["total_detections"], 0);
    assert_eq!(report["findings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn empty_directory_still_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.json");

    credsweep()
        .args(["scan", ".", "--format", "json", "--output"])
        .arg(&out)
        .current_dir(dir.path())
        .assert()
        .success();

    let written = fs::read_to_string(&out).expect("report file written");
    let report: serde_json::Value = serde_json::from_str(&written).expect("valid JSON report");
    assert_eq!(report["summary"]["total_detections"], 0);
}

#[test]
fn line_mode_reports_line_numbers() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("leak.py"),
        format!("# comment\n\nkey = \"{}\"\n", openai_key()),
    )
    .unwrap();

    let output = credsweep()
        .args(["scan", ".", "--lines", "--format", "json", "--exit-zero"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON report");
    assert_eq!(report["findings"][0]["line"], 3);
}

#[test]
fn excluded_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    let modules = dir.path().join("node_modules");
    fs::create_dir(&modules).unwrap();
    fs::write(modules.join("dep.js"), format!("const k = \"{}\"", openai_key())).unwrap();

    credsweep().args(["scan", "."]).current_dir(dir.path()).assert().success();
}

#[test]
fn config_file_extends_exclusions() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".credsweep.toml"), "exclude_dirs = [\"generated\"]\n").unwrap();

    let generated = dir.path().join("generated");
    fs::create_dir(&generated).unwrap();
    fs::write(generated.join("out.py"), format!("k = \"{}\"", openai_key())).unwrap();

    credsweep().args(["scan", "."]).current_dir(dir.path()).assert().success();
}

#[test]
fn unrecognized_extensions_are_not_scanned() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blob.bin"), openai_key()).unwrap();

    credsweep().args(["scan", "."]).current_dir(dir.path()).assert().success();
}

#[test]
fn rules_lists_builtin_rule_ids() {
    credsweep()
        .args(["rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ai/openai-api-key"))
        .stdout(predicate::str::contains("cloud/azure-openai-endpoint"));
}

#[test]
fn rules_json_is_machine_readable() {
    let output = credsweep()
        .args(["rules", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rules: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let entries = rules.as_array().expect("array of rules");
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().any(|r| r["id"] == "ai/anthropic-api-key"));
}

#[test]
fn rules_filter_by_provider() {
    credsweep()
        .args(["rules", "--provider", "gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ai/gemini-api-key"))
        .stdout(predicate::str::contains("openai-api-key").not());
}

#[test]
fn validate_rejects_detection_only_provider() {
    credsweep()
        .args(["validate", "gemini", "AIzaSy-not-a-real-key"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("detection only"));
}

#[test]
fn validate_azure_requires_endpoint() {
    credsweep()
        .args(["validate", "azure-openai-key", "00112233445566778899aabbccddeeff"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn validate_unknown_provider_fails_at_parse() {
    credsweep()
        .args(["validate", "mistral", "whatever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown provider"));
}

#[test]
fn smart_scan_handles_local_directories() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leak.env"), format!("K={}", openai_key())).unwrap();

    credsweep()
        .args(["smart-scan", dir.path().to_str().expect("utf-8 path")])
        .assert()
        .code(1);
}
