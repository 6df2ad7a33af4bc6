//! End-to-end runs of the `mumbai-bill` binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mumbai-bill"))
        .args(args)
        .output()
        .expect("mumbai-bill process should run")
}

fn grand_total(stdout: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.starts_with("Grand total:"))
        .unwrap_or_else(|| panic!("missing grand total in output: {stdout}"));
    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid grand total line `{line}`"));
    raw.parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{raw}` from `{line}`"))
}

#[test]
fn prints_bill_for_builtin_tariff() {
    let output = run(&["--utility", "adani", "--units", "250"]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("Adani Electricity / Direct / Residential"));
    let expected = (1350.0 + 732.5 + 135.0 + 112.5) * 1.16 + 250.0 * 0.2604;
    assert!((grand_total(&stdout) - expected).abs() < 0.006);
}

#[test]
fn solar_above_units_fails() {
    let output = run(&["--units", "250", "--solar", "300"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("solar_units"), "stderr={stderr}");
}

#[test]
fn unknown_utility_fails() {
    let output = run(&["--utility", "Unknown", "--units", "100"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no tariff schedule registered"), "stderr={stderr}");
}

#[test]
fn malformed_number_is_usage_error() {
    let output = run(&["--units", "two hundred"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn list_tariffs_from_shipped_table() {
    let output = run(&["--tariffs", "tariffs/fy2025_26.toml", "--list-tariffs"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FY2025-26"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("  ")).count(), 6);
}

#[test]
fn welcome_network_raises_bill() {
    let direct = run(&["--units", "300"]);
    let welcome = run(&["--network", "welcome", "--units", "300"]);
    assert!(direct.status.success() && welcome.status.success());
    let direct_total = grand_total(&String::from_utf8_lossy(&direct.stdout));
    let welcome_total = grand_total(&String::from_utf8_lossy(&welcome.stdout));
    assert!(welcome_total > direct_total);
}

#[test]
fn export_writes_csv() {
    let path = std::env::temp_dir().join(format!("mumbai-bill-{}.csv", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let output = run(&["--units", "420", "--export", &path_str]);
    assert!(output.status.success());
    let csv = std::fs::read_to_string(&path).expect("CSV should be written");
    std::fs::remove_file(&path).ok();
    assert!(csv.starts_with("component,lower_kwh,upper_kwh,units_kwh,rate,amount"));
    assert!(csv.lines().any(|l| l.starts_with("grand_total,")));
}
