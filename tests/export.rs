mod common;

use std::fs;

use csv::Reader;
use motor_design_calculator::config::validate;
use motor_design_calculator::export::report::{
    DesignReport, SummaryReport, write_design, write_summary,
};
use motor_design_calculator::export::timeline::{write_timeline, writer_for_path};
use motor_design_calculator::injector::size_injector;
use motor_design_calculator::montecarlo::{UncertaintySpec, run_monte_carlo_seeded};
use motor_design_calculator::performance::solve;
use motor_design_calculator::regression::simulate;

#[test]
fn timeline_csv_round_trips_through_a_reader() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let timeline = simulate(&configuration, 12).expect("simulates");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("artifacts").join("burn.csv");
    let mut writer = writer_for_path(&path).expect("writer");
    write_timeline(&timeline, writer.as_mut()).expect("write");
    drop(writer);

    let mut reader = Reader::from_path(&path).expect("read back");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "time_s",
            "port_diameter_m",
            "of_ratio",
            "chamber_pressure_pa",
            "thrust_n",
            "status"
        ]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("record")).collect();
    assert_eq!(records.len(), 12);
    assert_eq!(records[0].get(0), Some("0.0000"));
    for record in &records {
        assert_eq!(record.get(5), Some("nominal"));
        let thrust: f64 = record.get(4).unwrap().parse().expect("thrust field");
        assert!(thrust > 0.0);
    }
}

#[test]
fn design_report_json_carries_the_injector_section() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let performance = solve(&configuration).expect("converges");
    let injector = size_injector(&configuration, &performance).expect("sizes");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("design.json");
    let report = DesignReport::new(&configuration.name, &performance, Some(&injector));
    write_design(&path, &report).expect("write");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(value["motor"], "reference-hybrid");
    assert!(value["specific_impulse_s"].as_f64().unwrap() > 150.0);
    assert_eq!(value["injector"]["family"], "showerhead");
    assert!(value["injector"]["geometry"]["showerhead"]["hole_count"].as_u64().unwrap() >= 1);
}

#[test]
fn solid_design_report_omits_the_injector_section() {
    let configuration = validate(common::demo_solid()).expect("valid");
    let performance = solve(&configuration).expect("converges");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("solid.json");
    let report = DesignReport::new(&configuration.name, &performance, None);
    write_design(&path, &report).expect("write");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert!(value.get("injector").is_none());
}

#[test]
fn monte_carlo_summary_json_reports_the_success_rate() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let spec = UncertaintySpec::uniform(0.01).expect("spec");
    let summary = run_monte_carlo_seeded(&configuration, &spec, 200, 11).expect("runs");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("montecarlo.json");
    let report = SummaryReport {
        motor: &configuration.name,
        seed: Some(11),
        summary: &summary,
    };
    write_summary(&path, &report).expect("write");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(value["motor"], "reference-hybrid");
    assert_eq!(value["seed"], 11);
    assert!(value["success_rate"].as_f64().unwrap() > 0.0);
    assert!(value["thrust_n"]["mean"].as_f64().is_some());
}
