mod common;

use motor_design_calculator::config::{GrainRequest, validate};
use motor_design_calculator::regression::{
    RegressionError, SampleStatus, simulate,
};

#[test]
fn timeline_holds_the_ordering_invariants() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let timeline = simulate(&configuration, 40).expect("simulates");

    assert_eq!(timeline.samples.len(), 40);
    assert!(!timeline.burnthrough);
    assert!(!timeline.stalled);

    for pair in timeline.samples.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s, "time must strictly increase");
        assert!(
            pair[1].port_diameter_m >= pair[0].port_diameter_m,
            "port diameter must never shrink"
        );
    }
    for sample in &timeline.samples {
        assert_eq!(sample.status, SampleStatus::Nominal);
        assert!(sample.of_ratio > 0.0);
        assert!(sample.chamber_pressure_pa > 0.0);
        assert!(sample.thrust_n > 0.0);
    }
}

#[test]
fn solid_timeline_is_progressive() {
    // A pressure-law grain burns faster as the port opens; thrust climbs.
    let configuration = validate(common::demo_solid()).expect("valid");
    let timeline = simulate(&configuration, 30).expect("simulates");
    let first = &timeline.samples[0];
    let last = &timeline.samples[timeline.samples.len() - 1];
    assert!(last.port_diameter_m > first.port_diameter_m);
    assert!(last.thrust_n > first.thrust_n);
}

#[test]
fn thin_web_truncates_with_a_frozen_burnthrough_tail() {
    let mut request = common::reference_hybrid();
    request.grain = Some(GrainRequest {
        port_diameter_m: Some(0.040),
        outer_diameter_m: Some(0.050),
        length_m: None,
        target_oxidizer_flux_kg_m2_s: None,
    });
    let configuration = validate(request).expect("valid");
    let timeline = simulate(&configuration, 20).expect("simulates");

    assert!(timeline.burnthrough, "a 5 mm web cannot survive a 10 s burn");
    assert_eq!(timeline.samples.len(), 20, "the timeline stays fixed-length");

    let first_frozen = timeline
        .samples
        .iter()
        .position(|sample| sample.status == SampleStatus::BurnthroughRisk)
        .expect("a frozen tail exists");
    assert!(first_frozen > 0, "ignition itself must have been valid");

    let frozen = &timeline.samples[first_frozen];
    for sample in &timeline.samples[first_frozen..] {
        assert_eq!(sample.status, SampleStatus::BurnthroughRisk);
        assert_eq!(sample.port_diameter_m, frozen.port_diameter_m);
        assert_eq!(sample.thrust_n, frozen.thrust_n);
    }
    for pair in timeline.samples.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s);
    }
}

#[test]
fn step_count_is_range_checked() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    assert!(matches!(
        simulate(&configuration, 1),
        Err(RegressionError::InvalidStepCount(1))
    ));
    assert!(matches!(
        simulate(&configuration, 1_000_000),
        Err(RegressionError::InvalidStepCount(_))
    ));
}

#[test]
fn step_spacing_matches_the_burn_time() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let timeline = simulate(&configuration, 50).expect("simulates");
    assert!((timeline.step_seconds - configuration.burn_time_s / 50.0).abs() < 1.0e-12);
    assert_eq!(timeline.samples[0].time_s, 0.0);
}
