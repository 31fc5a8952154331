mod common;

use motor_design_calculator::config::{
    CombustionMode, CombustionRequest, FiniteAreaSpec, MotorClass, validate,
};

#[test]
fn tank_below_chamber_pressure_is_rejected_with_the_relation_cited() {
    let mut request = common::reference_hybrid();
    request.chamber_pressure_pa = 2.0e6;
    request.tank_pressure_pa = Some(1.9e6);

    let error = validate(request).expect_err("tank below chamber must fail");
    assert!(
        error
            .issues
            .iter()
            .any(|issue| issue.contains("tank_pressure_pa") && issue.contains("chamber_pressure_pa")),
        "issues must cite the tank/chamber relation: {:?}",
        error.issues
    );
}

#[test]
fn every_violated_rule_is_reported_not_just_the_first() {
    let mut request = common::reference_hybrid();
    request.thrust_n = -5.0;
    request.of_ratio = 25.0;
    request.burn_time_s = 4000.0;

    let error = validate(request).expect_err("three violations must fail");
    assert!(
        error.issues.len() >= 3,
        "expected all violations listed, got {:?}",
        error.issues
    );
    assert!(error.issues.iter().any(|issue| issue.contains("thrust_n")));
    assert!(error.issues.iter().any(|issue| issue.contains("of_ratio")));
    assert!(error.issues.iter().any(|issue| issue.contains("burn_time_s")));
}

#[test]
fn burn_time_is_capped_at_five_minutes() {
    let mut at_cap = common::reference_hybrid();
    at_cap.burn_time_s = 300.0;
    assert!(validate(at_cap).is_ok(), "a 300 s burn is the longest allowed");

    let mut over_cap = common::reference_hybrid();
    over_cap.burn_time_s = 301.0;
    let error = validate(over_cap).expect_err("301 s must fail");
    assert!(error.issues.iter().any(|issue| issue.contains("burn_time_s")));
}

#[test]
fn of_ratio_accepts_any_positive_value_up_to_twenty() {
    let mut fuel_rich = common::reference_hybrid();
    fuel_rich.of_ratio = 0.005;
    assert!(validate(fuel_rich).is_ok(), "a deeply fuel-rich ratio is legal");

    let mut zero = common::reference_hybrid();
    zero.of_ratio = 0.0;
    let error = validate(zero).expect_err("zero O/F must fail");
    assert!(error.issues.iter().any(|issue| issue.contains("of_ratio")));

    let mut negative = common::reference_hybrid();
    negative.of_ratio = -1.0;
    assert!(validate(negative).is_err(), "a negative O/F must fail");
}

#[test]
fn thin_tank_margin_warns_but_does_not_fail() {
    let mut request = common::reference_hybrid();
    // 10% over chamber pressure: legal, below the 20% recommendation.
    request.tank_pressure_pa = Some(2.2e6);

    let configuration = validate(request).expect("thin margin is not a hard failure");
    assert!(
        configuration
            .warnings
            .iter()
            .any(|warning| warning.contains("margin")),
        "expected a margin advisory: {:?}",
        configuration.warnings
    );
}

#[test]
fn finite_area_mode_requires_exactly_one_input() {
    let mut both = common::reference_hybrid();
    both.combustion = Some(CombustionRequest {
        contraction_ratio: Some(4.0),
        chamber_mass_flux_kg_m2_s: Some(800.0),
    });
    let error = validate(both).expect_err("both inputs must fail");
    assert!(error.issues.iter().any(|issue| issue.contains("mutually exclusive")));

    let mut neither = common::reference_hybrid();
    neither.combustion = Some(CombustionRequest::default());
    assert!(validate(neither).is_err(), "an empty combustion table must fail");

    let mut one = common::reference_hybrid();
    one.combustion = Some(CombustionRequest {
        contraction_ratio: Some(4.0),
        chamber_mass_flux_kg_m2_s: None,
    });
    let configuration = validate(one).expect("a single input is valid");
    assert_eq!(
        configuration.combustion,
        CombustionMode::FiniteArea(FiniteAreaSpec::ContractionRatio(4.0))
    );
}

#[test]
fn hybrid_requires_an_injector_table() {
    let mut request = common::reference_hybrid();
    request.injector = None;
    let error = validate(request).expect_err("hybrid without injector must fail");
    assert!(error.issues.iter().any(|issue| issue.contains("injector")));
}

#[test]
fn solid_ignores_feed_sections_with_a_warning() {
    let mut request = common::demo_solid();
    request.tank_pressure_pa = Some(5.0e6);
    request.injector = Some(common::showerhead());

    let configuration = validate(request).expect("solid with extra sections is valid");
    assert_eq!(configuration.class, MotorClass::Solid);
    assert!(configuration.tank_pressure_pa.is_none());
    assert!(configuration.injector.is_none());
    assert!(configuration.warnings.iter().any(|w| w.contains("ignored")));
}

#[test]
fn implausible_chamber_diameter_is_rejected() {
    let mut request = common::reference_hybrid();
    request.chamber = Some(motor_design_calculator::config::ChamberRequest {
        characteristic_length_m: None,
        diameter_m: Some(5.0),
    });
    let error = validate(request).expect_err("5 m chamber bore must fail");
    assert!(error.issues.iter().any(|issue| issue.contains("chamber.diameter_m")));
}

#[test]
fn defaults_fill_unset_sections() {
    let configuration = validate(common::reference_hybrid()).expect("reference motor is valid");
    assert!(configuration.gas.gamma > 1.0);
    assert!(configuration.gas.chamber_temperature_k > 1200.0);
    assert!(configuration.oxidizer.density_kg_m3 > 0.0);
    assert!(configuration.chamber.characteristic_length_m > 0.0);
    assert_eq!(configuration.combustion, CombustionMode::InfiniteArea);
}
