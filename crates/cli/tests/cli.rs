use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const MOTOR_TOML: &str = r#"
name = "cli-test-hybrid"
class = "hybrid"
thrust_n = 1000.0
burn_time_s = 10.0
of_ratio = 6.5
chamber_pressure_pa = 2.0e6
tank_pressure_pa = 3.0e6

[injector]
type = "showerhead"
target_velocity_m_s = 30.0
discharge_coefficient = 0.75
"#;

fn write_motor(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("motor.toml");
    fs::write(&path, MOTOR_TOML).expect("motor toml");
    path
}

#[test]
fn design_prints_report_and_writes_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let motor = write_motor(&dir);
    let json = dir.path().join("design.json");

    Command::cargo_bin("design")
        .expect("design bin")
        .arg(&motor)
        .args(["--json", json.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Motor Design: cli-test-hybrid"))
        .stdout(predicate::str::contains("Isp ="))
        .stdout(predicate::str::contains("showerhead"));

    let contents = fs::read_to_string(&json).expect("json report");
    assert!(contents.contains("\"specific_impulse_s\""));
    assert!(contents.contains("\"hole_count\""));
}

#[test]
fn design_rejects_unknown_motor_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let motor = write_motor(&dir);

    Command::cargo_bin("design")
        .expect("design bin")
        .arg(&motor)
        .args(["--motor", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn burn_streams_timeline_csv_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let motor = write_motor(&dir);

    Command::cargo_bin("burn")
        .expect("burn bin")
        .arg(&motor)
        .args(["--steps", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "time_s,port_diameter_m,of_ratio,chamber_pressure_pa,thrust_n,status",
        ))
        .stdout(predicate::str::contains("nominal"));
}

#[test]
fn montecarlo_reports_success_rate() {
    let dir = tempfile::tempdir().expect("tempdir");
    let motor = write_motor(&dir);

    Command::cargo_bin("montecarlo")
        .expect("montecarlo bin")
        .arg(&motor)
        .args(["--samples", "200", "--seed", "7", "--spread", "0.01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("success rate"))
        .stdout(predicate::str::contains("Thrust"));
}

#[test]
fn montecarlo_rejects_unknown_vary_parameter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let motor = write_motor(&dir);

    Command::cargo_bin("montecarlo")
        .expect("montecarlo bin")
        .arg(&motor)
        .args(["--samples", "50", "--vary", "no_such_field=0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown uncertain parameter"));
}
