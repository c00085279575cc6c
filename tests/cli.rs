//! CLI tests for the flutter-android-config binary

mod fixtures;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("flutter-android-config").unwrap()
}

fn rmapp_args(subcommand: &str) -> Vec<String> {
    vec![
        subcommand.to_string(),
        "-d".to_string(),
        fixtures::rmapp_declaration().display().to_string(),
        "-p".to_string(),
        fixtures::rmapp_provider().display().to_string(),
        "-l".to_string(),
        fixtures::rmapp_local_properties().display().to_string(),
    ]
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn test_resolve_prints_json() {
    let output = cli().args(rmapp_args("resolve")).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["minSdk"], 21);
    assert_eq!(json["config"]["compileSdk"], 34);
    assert_eq!(json["config"]["javaLevel"], 17);
    assert_eq!(json["config"]["versionName"], "1.0.3");
}

#[test]
fn test_resolve_with_provenance_to_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("effective.json");

    let mut args = rmapp_args("resolve");
    args.push("--provenance".to_string());
    args.push("-o".to_string());
    args.push(out.display().to_string());
    cli().args(&args).assert().success().stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["schema_id"], "flutter-android-config/effective_config@1");
    assert_eq!(json["config_digest"].as_str().map(str::len), Some(64));
    assert_eq!(json["sources"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_verify_summary() {
    cli()
        .args(rmapp_args("verify"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"))
        .stdout(predicate::str::contains("SDK: min 21 / target 34 / compile 34"))
        .stdout(predicate::str::contains("Version: 1.0.3 (4)"));
}

#[test]
fn test_plugins_bridge_last() {
    let output = cli().args(rmapp_args("plugins")).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"com.android.application"));
    assert_eq!(lines.last(), Some(&"dev.flutter.flutter-gradle-plugin"));
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_render_app_and_root() {
    cli()
        .args(rmapp_args("render"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("plugins {"))
        .stdout(predicate::str::contains("namespace = \"com.example.rmapp\""));

    let mut args = rmapp_args("render");
    args.push("--root".to_string());
    cli()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("buildscript {"))
        .stdout(predicate::str::contains("allprojects {"));
}

#[test]
fn test_conflicting_override_fails() {
    let mut args = rmapp_args("verify");
    args.push("--set".to_string());
    args.push("javaLevel=21".to_string());
    cli()
        .args(&args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("javaLevel"));
}

#[test]
fn test_error_printed_with_logging_off() {
    let mut args = rmapp_args("verify");
    args.push("--set".to_string());
    args.push("javaLevel=21".to_string());
    cli()
        .env("RUST_LOG", "off")
        .args(&args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Conflicting values for 'javaLevel'"));
}

#[test]
fn test_malformed_override_fails() {
    let mut args = rmapp_args("resolve");
    args.push("--set".to_string());
    args.push("minSdk".to_string());
    cli().args(&args).assert().failure().code(1);
}

#[test]
fn test_missing_declaration_fails() {
    let temp = TempDir::new().unwrap();
    cli()
        .args(["resolve", "-d"])
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}
