//! Swirl (tangential slot) element sizing.

use motor_core::{geometry, units};

use crate::{
    FeedContext, InjectorDesign, InjectorError, InjectorGeometry, hydraulic_warnings,
    injection_velocity, orifice_area,
};

/// Swirl chamber diameter as a multiple of the equivalent exit orifice.
const CHAMBER_TO_EXIT: f64 = 3.0;

pub(crate) fn size(
    ctx: &FeedContext,
    slot_count: usize,
    spray_half_angle_deg: f64,
    discharge_coefficient: f64,
    pressure_drop_pa: Option<f64>,
) -> Result<InjectorDesign, InjectorError> {
    let mut warnings = Vec::new();

    let drop = match pressure_drop_pa {
        Some(requested) if requested > ctx.available_drop_pa => {
            warnings.push(format!(
                "requested pressure drop {:.0} Pa exceeds the {:.0} Pa the feed provides",
                requested, ctx.available_drop_pa
            ));
            ctx.available_drop_pa
        }
        Some(requested) => requested,
        None => ctx.available_drop_pa,
    };

    // The spray cone opens at the ratio of tangential to axial velocity:
    // tan(half-angle) = v_t / v_a. The tangential slots meter the flow at
    // v_t, the axial exit orifice passes it at v_a, so both areas follow
    // from the metered area and the declared cone angle.
    let velocity = injection_velocity(discharge_coefficient, ctx.density_kg_m3, drop);
    let half_angle = units::deg_to_rad(spray_half_angle_deg);
    let metered_area =
        orifice_area(ctx.mass_flow_kg_s, discharge_coefficient, ctx.density_kg_m3, drop);
    let slot_total_area = metered_area / half_angle.sin();
    let exit_area = metered_area / half_angle.cos();

    // Each slot keeps the same component split in its cross-section: the
    // axial depth grows with the tangential share of the velocity.
    let slot_area = slot_total_area / slot_count as f64;
    let slot_width = (slot_area / half_angle.tan()).sqrt();
    let slot_height = slot_area / slot_width;

    // Tangential slots wrap a swirl chamber scaled off the exit orifice.
    let exit_diameter = geometry::diameter_from_area(exit_area);
    let swirl_chamber_diameter = CHAMBER_TO_EXIT * exit_diameter;
    let envelope = swirl_chamber_diameter + 2.0 * slot_height;
    if envelope > ctx.footprint_limit_m {
        return Err(InjectorError::InfeasibleGeometry {
            required_area_m2: geometry::circle_area(envelope),
            available_area_m2: geometry::circle_area(ctx.footprint_limit_m),
            detail: "swirl element exceeds the chamber face".to_string(),
        });
    }

    let tangential_velocity = velocity * half_angle.sin();
    let hydraulic_diameter = 2.0 * slot_area / (slot_width + slot_height);
    let reynolds_number = crate::reynolds(
        ctx.density_kg_m3,
        tangential_velocity,
        hydraulic_diameter,
        ctx.viscosity_pa_s,
    );
    hydraulic_warnings(ctx, drop, reynolds_number, &mut warnings);

    Ok(InjectorDesign {
        pressure_drop_pa: drop,
        exit_velocity_m_s: velocity,
        reynolds_number,
        discharge_coefficient,
        total_orifice_area_m2: slot_total_area,
        footprint_diameter_m: envelope,
        geometry: InjectorGeometry::Swirl {
            slot_count,
            slot_width_m: slot_width,
            slot_height_m: slot_height,
            spray_half_angle_deg,
        },
        warnings,
    })
}
