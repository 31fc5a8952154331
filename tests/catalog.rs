use motor_design_calculator::config::{MotorClass, find_motor, load_motors, validate};

#[test]
fn sample_catalog_covers_every_motor_class_and_injector_family() {
    let motors = load_motors("configs/motors").expect("catalog directory");
    assert!(motors.len() >= 4);
    assert!(find_motor(&motors, "reference-hybrid").is_some());
    assert!(find_motor(&motors, "pintle-hybrid").is_some());
    assert!(find_motor(&motors, "swirl-hybrid").is_some());

    let solid = find_motor(&motors, "demo-solid").expect("solid demonstrator");
    assert_eq!(solid.class, MotorClass::Solid);
}

#[test]
fn every_sample_motor_validates() {
    let motors = load_motors("configs/motors").expect("catalog directory");
    for motor in motors {
        let name = motor.name.clone();
        validate(motor).unwrap_or_else(|error| panic!("{name} failed validation: {error}"));
    }
}

#[test]
fn motor_lookup_is_case_insensitive() {
    let motors = load_motors("configs/motors").expect("catalog directory");
    assert!(find_motor(&motors, "Reference-Hybrid").is_some());
    assert!(find_motor(&motors, "no-such-motor").is_none());
}

#[test]
fn version_is_exposed_for_smoke_checks() {
    assert!(!motor_design_calculator::version().is_empty());
}
