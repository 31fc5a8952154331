//! Pintle (annular gap) element sizing.

use motor_core::geometry;
use motor_core::units::m_to_mm;

use crate::{
    FeedContext, InjectorDesign, InjectorError, InjectorGeometry, hydraulic_warnings,
    orifice_area,
};

/// Annular gaps below this width are hard to hold to tolerance.
const MIN_GAP_M: f64 = 1.0e-4;

pub(crate) fn size(
    ctx: &FeedContext,
    pintle_diameter_m: f64,
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

    let annulus_area =
        orifice_area(ctx.mass_flow_kg_s, discharge_coefficient, ctx.density_kg_m3, drop);

    // Solve the annulus outer diameter around the fixed pintle post.
    let outer_diameter = (pintle_diameter_m * pintle_diameter_m
        + 4.0 * annulus_area / std::f64::consts::PI)
        .sqrt();
    let gap = (outer_diameter - pintle_diameter_m) / 2.0;
    if gap < MIN_GAP_M {
        warnings.push(format!(
            "annular gap {:.3} mm is below typical machining tolerance",
            m_to_mm(gap)
        ));
    }

    if outer_diameter > ctx.footprint_limit_m {
        return Err(InjectorError::InfeasibleGeometry {
            required_area_m2: geometry::circle_area(outer_diameter),
            available_area_m2: geometry::circle_area(ctx.footprint_limit_m),
            detail: "pintle annulus exceeds the chamber face".to_string(),
        });
    }

    let velocity = ctx.mass_flow_kg_s / (ctx.density_kg_m3 * annulus_area);
    let hydraulic_diameter = 2.0 * gap;
    let reynolds_number = crate::reynolds(
        ctx.density_kg_m3,
        velocity,
        hydraulic_diameter,
        ctx.viscosity_pa_s,
    );
    hydraulic_warnings(ctx, drop, reynolds_number, &mut warnings);

    Ok(InjectorDesign {
        pressure_drop_pa: drop,
        exit_velocity_m_s: velocity,
        reynolds_number,
        discharge_coefficient,
        total_orifice_area_m2: annulus_area,
        footprint_diameter_m: outer_diameter,
        geometry: InjectorGeometry::Pintle {
            pintle_diameter_m,
            annular_gap_m: gap,
            outer_diameter_m: outer_diameter,
        },
        warnings,
    })
}
