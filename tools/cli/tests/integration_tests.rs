use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn ticker(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("salary-ticker").unwrap();
    cmd.arg("--config").arg(config_path(temp_dir));
    cmd.env_remove("SALARY_TICKER_LANG");
    cmd
}

fn config_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("config.toml")
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("salary-ticker").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Watch your salary accrue in real time"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("salary-ticker").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("salary-ticker"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("salary-ticker").unwrap();
    cmd.arg("invalid_command");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_config_file_creation() {
    let temp_dir = TempDir::new().unwrap();

    ticker(&temp_dir).arg("status").assert().success();

    let content = std::fs::read_to_string(config_path(&temp_dir)).unwrap();
    assert!(content.contains("frame_interval_ms"));
    assert!(content.contains("pay_day = 15"));
    assert!(content.contains("language = \"tr\""));
}

#[test]
fn test_status_uses_language_flag() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["--lang", "en", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary Tracker Status"))
        .stdout(predicate::str::contains("Language: en"));
}

#[test]
fn test_language_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .env("SALARY_TICKER_LANG", "en")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary Tracker Status"));
}

#[test]
fn test_settings_file_is_respected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        config_path(&temp_dir),
        "[display]\nlanguage = \"en\"\nframe_interval_ms = 40\nsmoothing = false\n\n\
         [defaults]\nsalary_kind = \"gross\"\ncurrency = \"USD\"\npay_day = 1\n",
    )
    .unwrap();

    let output = ticker(&temp_dir)
        .args(["snapshot", "--amount", "3,000", "--at", "2024-06-16", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["currency"], "USD");
    assert_eq!(report["salary_kind"], "gross");
    assert_eq!(report["pay_day"], 1);
    assert_eq!(report["monthly_amount"], 3000.0);
    assert_eq!(report["earned_formatted"], "$1,500.00");
}

#[test]
fn test_snapshot_json_at_cycle_start() {
    let temp_dir = TempDir::new().unwrap();
    let output = ticker(&temp_dir)
        .args([
            "snapshot",
            "--amount",
            "30000",
            "--currency",
            "usd",
            "--pay-day",
            "15",
            "--at",
            "2024-05-15T00:00:00",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["earned"], 0.0);
    assert_eq!(report["percent"], 0);
    assert_eq!(report["days_left"], 31);
    assert_eq!(report["cycle_start"], "2024-05-15T00:00:00");
    assert_eq!(report["cycle_end"], "2024-06-15T00:00:00");
    assert_eq!(report["rates_formatted"]["per_day"], "$1,000.00");
    assert_eq!(report["rates_formatted"]["per_hour"], "$41.67");
    assert_eq!(report["rates_formatted"]["per_second"], "$0.01");
}

#[test]
fn test_snapshot_text_in_turkish() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args([
            "--lang",
            "tr",
            "snapshot",
            "--amount",
            "30.000",
            "--pay-day",
            "1",
            "--at",
            "2024-06-16T00:00:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("BU AY KAZANDINIZ: ₺15.000,00"))
        .stdout(predicate::str::contains("GÜNLÜK: ₺1.000,00"))
        .stdout(predicate::str::contains("Net · TL"));
}

#[test]
fn test_snapshot_yaml_for_preset() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["snapshot", "--preset", "musk", "--at", "2024-03-01", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caption: Elon Musk"))
        .stdout(predicate::str::contains("currency: USD"))
        .stdout(predicate::str::contains("salary_kind: net"))
        .stdout(predicate::str::contains("5,787.04"));
}

#[test]
fn test_snapshot_rejects_non_positive_amount() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["snapshot", "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid salary amount"));
}

#[test]
fn test_snapshot_without_amount() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .arg("snapshot")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No salary amount provided"));
}

#[test]
fn test_unknown_preset() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["snapshot", "--preset", "scrooge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset earner: scrooge"));
}

#[test]
fn test_preset_conflicts_with_amount() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["snapshot", "--preset", "musk", "--amount", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_currency_flag() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["snapshot", "--amount", "100", "--currency", "gbp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown currency"));
}

#[test]
fn test_presets_table() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["--lang", "en", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elon Musk"))
        .stdout(predicate::str::contains("$15,000,000,000.00"))
        .stdout(predicate::str::contains("Bill Gates"));
}

#[test]
fn test_track_rejects_oversized_time_limit() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args(["track", "--amount", "100", "--for", "300000000000000000d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duration too large"));
}

#[test]
fn test_track_without_salary_or_terminal() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .arg("track")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No salary provided"));
}

#[test]
fn test_track_runs_for_a_fixed_time() {
    let temp_dir = TempDir::new().unwrap();
    ticker(&temp_dir)
        .args([
            "--lang",
            "en",
            "track",
            "--amount",
            "4,500",
            "--currency",
            "usd",
            "--pay-day",
            "1",
            "--for",
            "2s",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("EARNED THIS MONTH"))
        .stdout(predicate::str::contains("EARNED THIS SESSION"))
        .stdout(predicate::str::contains("$150.00"));
}
