mod common;

use std::sync::atomic::AtomicBool;

use motor_design_calculator::config::validate;
use motor_design_calculator::montecarlo::{
    MonteCarloError, UncertaintySpec, run_monte_carlo_seeded, run_monte_carlo_with_stop,
};

#[test]
fn tight_uncertainty_on_a_nominal_design_mostly_succeeds() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let spec = UncertaintySpec::uniform(0.01).expect("spec");
    let summary =
        run_monte_carlo_seeded(&configuration, &spec, 10_000, 0xC0FFEE).expect("runs");

    assert_eq!(summary.completed_samples, 10_000);
    assert!(
        summary.success_rate > 0.95,
        "success rate {} too low for a 1% spread",
        summary.success_rate
    );

    // The population should sit around the nominal solution.
    assert!((summary.thrust_n.mean - 1000.0).abs() / 1000.0 < 0.1);
    assert!(summary.specific_impulse_s.mean > 150.0 && summary.specific_impulse_s.mean < 250.0);
    assert!(summary.thrust_n.percentile_5 < summary.thrust_n.mean);
    assert!(summary.thrust_n.percentile_95 > summary.thrust_n.mean);
    assert!(summary.thrust_n.std_dev > 0.0);
    assert!(summary.thrust_n.coefficient_of_variation > 0.0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let spec = UncertaintySpec::uniform(0.02).expect("spec");

    let first = run_monte_carlo_seeded(&configuration, &spec, 500, 42).expect("runs");
    let second = run_monte_carlo_seeded(&configuration, &spec, 500, 42).expect("runs");
    assert_eq!(first.successful_samples, second.successful_samples);
    assert_eq!(first.thrust_n.mean, second.thrust_n.mean);
    assert_eq!(first.thrust_n.std_dev, second.thrust_n.std_dev);
    assert_eq!(
        first.chamber_pressure_pa.percentile_95,
        second.chamber_pressure_pa.percentile_95
    );

    let other = run_monte_carlo_seeded(&configuration, &spec, 500, 43).expect("runs");
    assert_ne!(first.thrust_n.mean, other.thrust_n.mean);
}

#[test]
fn wider_spread_widens_the_output_distribution() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let tight = UncertaintySpec::uniform(0.005).expect("spec");
    let wide = UncertaintySpec::uniform(0.05).expect("spec");

    let narrow = run_monte_carlo_seeded(&configuration, &tight, 2_000, 7).expect("runs");
    let broad = run_monte_carlo_seeded(&configuration, &wide, 2_000, 7).expect("runs");
    assert!(broad.thrust_n.std_dev > narrow.thrust_n.std_dev);
}

#[test]
fn unknown_parameters_and_bad_sigmas_are_rejected() {
    let mut spec = UncertaintySpec::new();
    assert!(matches!(
        spec.set("no_such_field", 0.1),
        Err(MonteCarloError::UnknownParameter(_))
    ));
    assert!(matches!(
        spec.set("thrust_n", -0.1),
        Err(MonteCarloError::InvalidSigma { .. })
    ));
    spec.set("thrust_n", 0.02).expect("valid entry");
    assert_eq!(spec.entries().len(), 1);
}

#[test]
fn sample_count_is_range_checked() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let spec = UncertaintySpec::uniform(0.01).expect("spec");
    assert!(matches!(
        run_monte_carlo_seeded(&configuration, &spec, 5, 1),
        Err(MonteCarloError::InvalidSampleCount(5))
    ));
}

#[test]
fn a_pre_set_stop_flag_yields_no_samples() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let spec = UncertaintySpec::uniform(0.01).expect("spec");
    let stop = AtomicBool::new(true);
    assert!(matches!(
        run_monte_carlo_with_stop(&configuration, &spec, 100, 1, &stop),
        Err(MonteCarloError::NoSamples)
    ));
}

#[test]
fn infeasible_perturbations_count_against_the_success_rate() {
    // Park the tank barely above the chamber: pressure perturbations will
    // frequently invert the relation and fail validation.
    let mut request = common::reference_hybrid();
    request.tank_pressure_pa = Some(2.05e6);
    let configuration = validate(request).expect("valid at nominal");

    let mut spec = UncertaintySpec::new();
    spec.set("chamber_pressure_pa", 0.05).expect("entry");
    spec.set("tank_pressure_pa", 0.05).expect("entry");

    let summary = run_monte_carlo_seeded(&configuration, &spec, 2_000, 99).expect("runs");
    assert!(summary.successful_samples < summary.completed_samples);
    assert!(summary.success_rate < 1.0);
    assert!(summary.success_rate > 0.0);
}
