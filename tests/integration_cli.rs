//! Integration tests driving the golf-cli binary.

use std::process::Command;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_golf-cli"))
}

#[test]
fn test_cli_simulate_table() {
    let output = cli()
        .args(["simulate", "--club", "driver"])
        .output()
        .expect("failed to execute golf-cli");

    assert!(output.status.success(), "command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FLIGHT SUMMARY"));
    assert!(stdout.contains("Carry distance"));
}

#[test]
fn test_cli_simulate_json() {
    let output = cli()
        .args(["simulate", "--club", "driver", "--format", "json"])
        .output()
        .expect("failed to execute golf-cli");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

    let carry = value["summary"]["carry_distance"].as_f64().unwrap();
    let flight_time = value["summary"]["flight_time"].as_f64().unwrap();
    assert!(carry > 200.0 && carry < 260.0);
    assert!(flight_time > 5.0 && flight_time < 7.0);
    // Trajectory only included when requested
    assert!(value.get("trajectory").is_none());
}

#[test]
fn test_cli_simulate_json_with_trajectory() {
    let output = cli()
        .args([
            "simulate",
            "--club",
            "driver",
            "--format",
            "json",
            "--full",
        ])
        .output()
        .expect("failed to execute golf-cli");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value["trajectory"].as_array().unwrap();
    // 15 s at 50 samples/s, inclusive of t = 0
    assert_eq!(rows.len(), 15 * 50 + 1);
    assert_eq!(rows[0].as_array().unwrap().len(), 7);
}

#[test]
fn test_cli_simulate_csv() {
    let output = cli()
        .args([
            "simulate",
            "--speed",
            "50",
            "--angle",
            "25",
            "--spin-y",
            "-300",
            "--format",
            "csv",
            "--horizon",
            "10",
            "--resolution",
            "20",
        ])
        .output()
        .expect("failed to execute golf-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("time,vx,vy,vz,x,y,z"));
    assert_eq!(lines.count(), 10 * 20 + 1);
}

#[test]
fn test_cli_unknown_club_fails() {
    let output = cli()
        .args(["simulate", "--club", "putter"])
        .output()
        .expect("failed to execute golf-cli");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("putter"));
}

#[test]
fn test_cli_short_horizon_fails() {
    let output = cli()
        .args(["simulate", "--club", "driver", "--horizon", "3"])
        .output()
        .expect("failed to execute golf-cli");

    assert!(!output.status.success());
}

#[test]
fn test_cli_clubs_listing() {
    let output = cli().args(["clubs"]).output().expect("failed to execute golf-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("driver"));
    assert!(stdout.contains("7_iron"));
    assert!(stdout.contains("PW"));
}

#[test]
fn test_cli_simulate_with_table_files() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let output = cli()
        .args([
            "simulate",
            "--club",
            "driver",
            "--club-file",
            &format!("{}/data/clubs.csv", manifest_dir),
            "--drag-file",
            &format!("{}/data/C_d-Re.csv", manifest_dir),
            "--ball",
            "Titleist",
            "--format",
            "json",
        ])
        .output()
        .expect("failed to execute golf-cli");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["summary"]["carry_distance"].as_f64().unwrap() > 150.0);
}
