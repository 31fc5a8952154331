//! Grain sizing from the design operating point.

use std::f64::consts::PI;

use motor_config::{MotorClass, MotorConfiguration};
use motor_core::geometry;
use motor_core::units::m_to_mm;

use crate::SolverError;

/// Margin applied over the projected web consumption when the grain outer
/// diameter is not supplied.
pub const WEB_MARGIN: f64 = 1.25;

/// Port-to-throat diameter ratio used for solid core grains.
pub const SOLID_PORT_TO_THROAT: f64 = 2.0;

/// Clearance factor between the grain outer diameter and the chamber bore.
pub const CHAMBER_CLEARANCE: f64 = 1.05;

/// Fixed grain and throat geometry shared by the solver and the regression
/// simulator.
#[derive(Debug, Clone)]
pub struct GrainGeometry {
    pub port_diameter_m: f64,
    pub outer_diameter_m: f64,
    pub length_m: f64,
    pub throat_area_m2: f64,
}

/// Outcome of the design sizing pass.
#[derive(Debug, Clone)]
pub struct GrainSizing {
    pub geometry: GrainGeometry,
    /// Regression (or burn) rate at the design point (m/s).
    pub design_rate_m_s: f64,
    pub warnings: Vec<String>,
}

/// Size the grain so that it generates the design mass flow at the requested
/// chamber pressure. Explicit grain dimensions in the configuration override
/// the derived values.
pub fn size_grain(
    config: &MotorConfiguration,
    throat_area_m2: f64,
    total_kg_s: f64,
    oxidizer_kg_s: f64,
    fuel_kg_s: f64,
) -> Result<GrainSizing, SolverError> {
    let mut warnings = Vec::new();
    let throat_diameter = geometry::diameter_from_area(throat_area_m2);

    let port_diameter = match (config.class, config.grain.port_diameter_m) {
        (_, Some(diameter)) => diameter,
        (MotorClass::Hybrid, None) => geometry::diameter_from_area(
            oxidizer_kg_s / config.grain.target_oxidizer_flux_kg_m2_s,
        ),
        (MotorClass::Solid, None) => SOLID_PORT_TO_THROAT * throat_diameter,
    };
    if port_diameter <= throat_diameter {
        return Err(SolverError::Infeasible(format!(
            "port diameter {:.4} m does not exceed throat diameter {:.4} m",
            port_diameter, throat_diameter
        )));
    }

    let rate = design_rate(config, port_diameter, oxidizer_kg_s);
    let length = match config.grain.length_m {
        Some(length) => length,
        None => match config.class {
            MotorClass::Hybrid => {
                fuel_kg_s / (config.fuel.density_kg_m3 * PI * port_diameter * rate)
            }
            MotorClass::Solid => {
                total_kg_s / (config.fuel.density_kg_m3 * PI * port_diameter * rate)
            }
        },
    };

    let web = rate * config.burn_time_s;
    let outer_diameter = match config.grain.outer_diameter_m {
        Some(diameter) => diameter,
        None => port_diameter + 2.0 * WEB_MARGIN * web,
    };
    if port_diameter + 2.0 * web > outer_diameter {
        warnings.push(format!(
            "grain web {:.1} mm is thinner than the projected regression depth {:.1} mm",
            m_to_mm((outer_diameter - port_diameter) / 2.0),
            m_to_mm(web)
        ));
    }

    if let Some(bore) = config.chamber.diameter_m {
        if outer_diameter * CHAMBER_CLEARANCE > bore {
            return Err(SolverError::Infeasible(format!(
                "grain outer diameter {:.3} m does not fit the declared chamber bore {:.3} m",
                outer_diameter, bore
            )));
        }
    }

    Ok(GrainSizing {
        geometry: GrainGeometry {
            port_diameter_m: port_diameter,
            outer_diameter_m: outer_diameter,
            length_m: length,
            throat_area_m2,
        },
        design_rate_m_s: rate,
        warnings,
    })
}

/// Regression (or burn) rate at the design point, evaluated at reference
/// propellant temperature.
fn design_rate(config: &MotorConfiguration, port_diameter: f64, oxidizer_kg_s: f64) -> f64 {
    match config.class {
        MotorClass::Hybrid => {
            let flux = oxidizer_kg_s / geometry::circle_area(port_diameter);
            config.regression.a * flux.powf(config.regression.n)
        }
        MotorClass::Solid => {
            config.regression.a * config.chamber_pressure_pa.powf(config.regression.n)
        }
    }
}
