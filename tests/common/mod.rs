#![allow(dead_code)]

use motor_design_calculator::config::{InjectorRequest, MotorClass, MotorRequest};

/// The 1 kN reference hybrid: 10 s burn, O/F 6.5, 20 bar chamber, 30 bar
/// tank, showerhead injector at 30 m/s with Cd 0.75.
pub fn reference_hybrid() -> MotorRequest {
    MotorRequest {
        name: "reference-hybrid".to_string(),
        class: MotorClass::Hybrid,
        thrust_n: 1000.0,
        burn_time_s: 10.0,
        of_ratio: 6.5,
        chamber_pressure_pa: 2.0e6,
        tank_pressure_pa: Some(3.0e6),
        gas: None,
        nozzle: None,
        grain: None,
        regression: None,
        fuel: None,
        oxidizer: None,
        injector: Some(showerhead()),
        chamber: None,
        environment: None,
        combustion: None,
    }
}

/// A core-burning solid demonstrator.
pub fn demo_solid() -> MotorRequest {
    MotorRequest {
        name: "demo-solid".to_string(),
        class: MotorClass::Solid,
        thrust_n: 1500.0,
        burn_time_s: 6.0,
        of_ratio: 2.0,
        chamber_pressure_pa: 4.0e6,
        tank_pressure_pa: None,
        gas: None,
        nozzle: None,
        grain: None,
        regression: None,
        fuel: None,
        oxidizer: None,
        injector: None,
        chamber: None,
        environment: None,
        combustion: None,
    }
}

pub fn showerhead() -> InjectorRequest {
    InjectorRequest::Showerhead {
        target_velocity_m_s: Some(30.0),
        discharge_coefficient: Some(0.75),
        min_hole_diameter_m: None,
        max_hole_diameter_m: None,
        plate_thickness_m: None,
        hole_count: None,
    }
}
