mod common;

use motor_design_calculator::config::{InjectorRequest, OxidizerRequest, validate};
use motor_design_calculator::injector::{
    FOOTPRINT_FRACTION, InjectorError, InjectorGeometry, LAMINAR_REYNOLDS, size_injector,
};
use motor_design_calculator::performance::solve;

#[test]
fn showerhead_auto_search_lands_in_the_preferred_geometry_band() {
    let configuration = validate(common::reference_hybrid()).expect("valid");
    let performance = solve(&configuration).expect("converges");
    let design = size_injector(&configuration, &performance).expect("sizes");

    let InjectorGeometry::Showerhead {
        hole_count,
        hole_diameter_m,
        length_to_diameter,
        ..
    } = design.geometry
    else {
        panic!("expected a showerhead design");
    };
    assert!(hole_count >= 1);
    assert!(hole_diameter_m >= 5.0e-4 && hole_diameter_m <= 2.5e-3);
    assert!(
        (3.0..=5.0).contains(&length_to_diameter),
        "L/D {length_to_diameter} outside the preferred band"
    );
    assert!(design.reynolds_number > LAMINAR_REYNOLDS);
    assert!(design.footprint_diameter_m <= FOOTPRINT_FRACTION * performance.chamber_diameter_m);
    assert!((design.exit_velocity_m_s - 30.0).abs() < 1.0);
}

#[test]
fn pinned_hole_bounds_that_cannot_pass_the_flow_are_infeasible() {
    let mut request = common::reference_hybrid();
    request.injector = Some(InjectorRequest::Showerhead {
        target_velocity_m_s: Some(30.0),
        discharge_coefficient: Some(0.75),
        min_hole_diameter_m: Some(3.0e-4),
        max_hole_diameter_m: Some(3.0e-4),
        plate_thickness_m: None,
        hole_count: None,
    });
    let configuration = validate(request).expect("valid");
    let performance = solve(&configuration).expect("converges");
    match size_injector(&configuration, &performance) {
        Err(InjectorError::InfeasibleGeometry {
            required_area_m2,
            available_area_m2,
            ..
        }) => {
            assert!(required_area_m2 > 0.0);
            assert!(available_area_m2 > 0.0);
        }
        other => panic!("expected infeasible geometry, got {other:?}"),
    }
}

#[test]
fn pintle_annulus_closes_the_flow_area_balance() {
    let mut request = common::reference_hybrid();
    request.injector = Some(InjectorRequest::Pintle {
        pintle_diameter_m: 0.012,
        discharge_coefficient: None,
        pressure_drop_pa: None,
    });
    let configuration = validate(request).expect("valid");
    let performance = solve(&configuration).expect("converges");
    let design = size_injector(&configuration, &performance).expect("sizes");

    let InjectorGeometry::Pintle {
        pintle_diameter_m,
        annular_gap_m,
        outer_diameter_m,
    } = design.geometry
    else {
        panic!("expected a pintle design");
    };
    assert!(annular_gap_m > 0.0);
    assert!(outer_diameter_m > pintle_diameter_m);

    // Continuity through the annulus: mdot = rho * A * v.
    let continuity = configuration.oxidizer.density_kg_m3
        * design.total_orifice_area_m2
        * design.exit_velocity_m_s;
    let error =
        (continuity - performance.oxidizer_mass_flow_kg_s).abs() / performance.oxidizer_mass_flow_kg_s;
    assert!(error < 1.0e-9, "annulus continuity error {error}");
}

#[test]
fn swirl_slots_follow_the_declared_count_and_angle() {
    let mut request = common::reference_hybrid();
    request.injector = Some(InjectorRequest::Swirl {
        slot_count: Some(8),
        spray_half_angle_deg: Some(50.0),
        discharge_coefficient: None,
        pressure_drop_pa: None,
    });
    let configuration = validate(request).expect("valid");
    let performance = solve(&configuration).expect("converges");
    let design = size_injector(&configuration, &performance).expect("sizes");

    let InjectorGeometry::Swirl {
        slot_count,
        slot_width_m,
        slot_height_m,
        spray_half_angle_deg,
    } = design.geometry
    else {
        panic!("expected a swirl design");
    };
    assert_eq!(slot_count, 8);
    assert_eq!(spray_half_angle_deg, 50.0);
    // Swirl elements default to the high end of the orifice Cd band.
    assert_eq!(design.discharge_coefficient, 0.75);
    // Past 45 degrees the tangential component dominates, so the slot
    // cross-section is deeper than it is wide.
    assert!(slot_width_m > 0.0 && slot_height_m > slot_width_m);
    let aspect = slot_height_m / slot_width_m;
    let expected = 50.0_f64.to_radians().tan();
    assert!(
        (aspect - expected).abs() / expected < 1.0e-9,
        "slot aspect {aspect} should follow tan(50 deg) = {expected}"
    );
}

#[test]
fn spray_half_angle_drives_the_slot_cross_section() {
    let swirl_at = |angle: f64| {
        let mut request = common::reference_hybrid();
        request.injector = Some(InjectorRequest::Swirl {
            slot_count: Some(8),
            spray_half_angle_deg: Some(angle),
            discharge_coefficient: None,
            pressure_drop_pa: None,
        });
        let configuration = validate(request).expect("valid");
        let performance = solve(&configuration).expect("converges");
        size_injector(&configuration, &performance).expect("sizes")
    };

    let shallow = swirl_at(15.0);
    let wide = swirl_at(70.0);

    let InjectorGeometry::Swirl {
        slot_width_m: shallow_width,
        slot_height_m: shallow_height,
        ..
    } = shallow.geometry
    else {
        panic!("expected a swirl design");
    };
    let InjectorGeometry::Swirl {
        slot_width_m: wide_width,
        slot_height_m: wide_height,
        ..
    } = wide.geometry
    else {
        panic!("expected a swirl design");
    };

    assert_ne!(shallow_width, wide_width);
    assert_ne!(shallow_height, wide_height);
    // A shallow cone carries little tangential velocity, so its slots must
    // spread the flow across a larger metering area.
    assert!(shallow.total_orifice_area_m2 > wide.total_orifice_area_m2);
    assert!(shallow_width > shallow_height);
    assert!(wide_height > wide_width);
}

#[test]
fn viscous_oxidizer_trips_the_laminar_advisory() {
    let mut request = common::reference_hybrid();
    request.oxidizer = Some(OxidizerRequest {
        name: Some("viscous-test-fluid".to_string()),
        density_kg_m3: Some(750.0),
        viscosity_pa_s: Some(0.05),
        vapor_pressure_pa: None,
    });
    let configuration = validate(request).expect("valid");
    let performance = solve(&configuration).expect("converges");
    let design = size_injector(&configuration, &performance).expect("sizes");

    assert!(design.reynolds_number < LAMINAR_REYNOLDS);
    assert!(
        design
            .warnings
            .iter()
            .any(|warning| warning.contains("Reynolds")),
        "expected a laminar advisory: {:?}",
        design.warnings
    );
}

#[test]
fn solid_motors_have_no_injector_to_size() {
    let configuration = validate(common::demo_solid()).expect("valid");
    let performance = solve(&configuration).expect("converges");
    assert!(matches!(
        size_injector(&configuration, &performance),
        Err(InjectorError::MissingSpec)
    ));
}
