//! Injector sizing for hybrid oxidizer feeds.
//!
//! Supports showerhead, pintle, and swirl element families. Sizing works
//! from the converged motor operating point: required oxidizer flow at the
//! equilibrium chamber pressure, with the tank providing the feed head.

use motor_config::{InjectorSpec, MotorConfiguration};
use motor_performance::MotorPerformance;
use serde::Serialize;
use thiserror::Error;

mod pintle;
mod showerhead;
mod swirl;

/// Fraction of the chamber diameter available to the injector pattern.
pub const FOOTPRINT_FRACTION: f64 = 0.9;

/// Reynolds number below which orifice discharge data is suspect.
pub const LAMINAR_REYNOLDS: f64 = 4000.0;

/// Fraction of the tank-over-vapor margin below which the pressure drop
/// risks flash boiling in the element orifices.
const FLASH_MARGIN_FRACTION: f64 = 0.2;

/// Sized injector geometry and hydraulic summary.
#[derive(Debug, Clone)]
pub struct InjectorDesign {
    pub pressure_drop_pa: f64,
    pub exit_velocity_m_s: f64,
    pub reynolds_number: f64,
    pub discharge_coefficient: f64,
    pub total_orifice_area_m2: f64,
    pub footprint_diameter_m: f64,
    pub geometry: InjectorGeometry,
    /// Advisory findings in evaluation order.
    pub warnings: Vec<String>,
}

/// Family-specific geometry of a sized injector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectorGeometry {
    Showerhead {
        hole_count: usize,
        hole_diameter_m: f64,
        plate_thickness_m: f64,
        length_to_diameter: f64,
    },
    Pintle {
        pintle_diameter_m: f64,
        annular_gap_m: f64,
        outer_diameter_m: f64,
    },
    Swirl {
        slot_count: usize,
        slot_width_m: f64,
        slot_height_m: f64,
        spray_half_angle_deg: f64,
    },
}

/// Errors raised while sizing an injector.
#[derive(Debug, Error)]
pub enum InjectorError {
    #[error("motor has no injector to size (solid motor or missing [injector] table)")]
    MissingSpec,
    #[error(
        "infeasible injector geometry ({detail}): required area {required_area_m2:.3e} m², \
         available {available_area_m2:.3e} m²"
    )]
    InfeasibleGeometry {
        required_area_m2: f64,
        available_area_m2: f64,
        detail: String,
    },
}

/// Feed conditions shared by every family sizing routine.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FeedContext {
    pub mass_flow_kg_s: f64,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    pub vapor_pressure_pa: Option<f64>,
    pub tank_pressure_pa: f64,
    pub available_drop_pa: f64,
    pub footprint_limit_m: f64,
}

/// Size the configured injector for the converged operating point.
pub fn size_injector(
    config: &MotorConfiguration,
    performance: &MotorPerformance,
) -> Result<InjectorDesign, InjectorError> {
    let Some(spec) = config.injector.as_ref() else {
        return Err(InjectorError::MissingSpec);
    };
    let Some(tank) = config.tank_pressure_pa else {
        return Err(InjectorError::MissingSpec);
    };

    let ctx = FeedContext {
        mass_flow_kg_s: performance.oxidizer_mass_flow_kg_s,
        density_kg_m3: config.oxidizer.density_kg_m3,
        viscosity_pa_s: config.oxidizer.viscosity_pa_s,
        vapor_pressure_pa: config.oxidizer.vapor_pressure_pa,
        tank_pressure_pa: tank,
        available_drop_pa: tank - performance.chamber_pressure_pa,
        footprint_limit_m: FOOTPRINT_FRACTION * performance.chamber_diameter_m,
    };

    match spec {
        InjectorSpec::Showerhead {
            target_velocity_m_s,
            discharge_coefficient,
            min_hole_diameter_m,
            max_hole_diameter_m,
            plate_thickness_m,
            hole_count,
        } => showerhead::size(
            &ctx,
            *target_velocity_m_s,
            *discharge_coefficient,
            *min_hole_diameter_m,
            *max_hole_diameter_m,
            *plate_thickness_m,
            *hole_count,
        ),
        InjectorSpec::Pintle {
            pintle_diameter_m,
            discharge_coefficient,
            pressure_drop_pa,
        } => pintle::size(
            &ctx,
            *pintle_diameter_m,
            *discharge_coefficient,
            *pressure_drop_pa,
        ),
        InjectorSpec::Swirl {
            slot_count,
            spray_half_angle_deg,
            discharge_coefficient,
            pressure_drop_pa,
        } => swirl::size(
            &ctx,
            *slot_count,
            *spray_half_angle_deg,
            *discharge_coefficient,
            *pressure_drop_pa,
        ),
    }
}

/// Total orifice area required to pass the mass flow at the given drop.
pub(crate) fn orifice_area(mass_flow: f64, cd: f64, density: f64, drop: f64) -> f64 {
    mass_flow / (cd * (2.0 * density * drop).sqrt())
}

/// Mean injection velocity through the orifice area.
pub(crate) fn injection_velocity(cd: f64, density: f64, drop: f64) -> f64 {
    cd * (2.0 * drop / density).sqrt()
}

/// Reynolds number on a characteristic orifice dimension.
pub(crate) fn reynolds(density: f64, velocity: f64, dimension: f64, viscosity: f64) -> f64 {
    density * velocity * dimension / viscosity
}

/// Append the shared hydraulic advisories for a sized element.
pub(crate) fn hydraulic_warnings(
    ctx: &FeedContext,
    drop: f64,
    reynolds_number: f64,
    warnings: &mut Vec<String>,
) {
    if reynolds_number < LAMINAR_REYNOLDS {
        warnings.push(format!(
            "orifice Reynolds number {reynolds_number:.0} is below {LAMINAR_REYNOLDS:.0}; \
             discharge coefficient data may not apply"
        ));
    }
    if let Some(vapor) = ctx.vapor_pressure_pa {
        let margin = ctx.tank_pressure_pa - vapor;
        if margin > 0.0 && drop < FLASH_MARGIN_FRACTION * margin {
            warnings.push(format!(
                "pressure drop {:.0} Pa is within {:.0}% of the flash-boiling margin {:.0} Pa",
                drop,
                FLASH_MARGIN_FRACTION * 100.0,
                margin
            ));
        }
    }
}
