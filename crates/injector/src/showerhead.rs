//! Showerhead (drilled plate) element sizing.

use motor_core::geometry;
use motor_core::units::m_to_mm;

use crate::{
    FeedContext, InjectorDesign, InjectorError, InjectorGeometry, hydraulic_warnings,
    injection_velocity, orifice_area,
};

/// Upper bound on the drilled hole count.
pub const MAX_HOLE_COUNT: usize = 200;

/// Preferred hole length-to-diameter ratio.
const TARGET_LENGTH_TO_DIAMETER: f64 = 4.0;

/// Hole pitch as a multiple of hole diameter.
const PITCH_FACTOR: f64 = 3.0;

/// Pitch floor below which adjacent holes weaken the plate.
const MIN_PITCH_FACTOR: f64 = 2.0;

pub(crate) fn size(
    ctx: &FeedContext,
    target_velocity_m_s: f64,
    discharge_coefficient: f64,
    min_hole_diameter_m: f64,
    max_hole_diameter_m: f64,
    plate_thickness_m: f64,
    hole_count: Option<usize>,
) -> Result<InjectorDesign, InjectorError> {
    let mut warnings = Vec::new();

    // The target injection velocity implies the pressure drop; the feed caps
    // what is actually available.
    let velocity_drop = ctx.density_kg_m3 * target_velocity_m_s * target_velocity_m_s
        / (2.0 * discharge_coefficient * discharge_coefficient);
    let drop = if velocity_drop > ctx.available_drop_pa {
        warnings.push(format!(
            "target injection velocity {:.0} m/s needs a {:.0} Pa drop but the feed \
             provides {:.0} Pa",
            target_velocity_m_s, velocity_drop, ctx.available_drop_pa
        ));
        ctx.available_drop_pa
    } else {
        velocity_drop
    };

    let total_area = orifice_area(ctx.mass_flow_kg_s, discharge_coefficient, ctx.density_kg_m3, drop);

    let (count, diameter) = match hole_count {
        Some(count) => {
            let diameter = geometry::diameter_from_area(total_area / count as f64);
            if diameter < min_hole_diameter_m || diameter > max_hole_diameter_m {
                return Err(InjectorError::InfeasibleGeometry {
                    required_area_m2: total_area,
                    available_area_m2: count as f64
                        * geometry::circle_area(max_hole_diameter_m),
                    detail: format!(
                        "fixed hole count {count} forces {:.2} mm holes outside the \
                         {:.2}-{:.2} mm bounds",
                        m_to_mm(diameter),
                        m_to_mm(min_hole_diameter_m),
                        m_to_mm(max_hole_diameter_m)
                    ),
                });
            }
            (count, diameter)
        }
        None => search_hole_count(
            total_area,
            min_hole_diameter_m,
            max_hole_diameter_m,
            plate_thickness_m,
            &mut warnings,
        )?,
    };

    let length_to_diameter = plate_thickness_m / diameter;
    let pitch = PITCH_FACTOR * diameter;
    let mut footprint = pitch * (count as f64).sqrt();
    if footprint > ctx.footprint_limit_m {
        let shrunk_pitch = ctx.footprint_limit_m / (count as f64).sqrt();
        if shrunk_pitch < MIN_PITCH_FACTOR * diameter {
            return Err(InjectorError::InfeasibleGeometry {
                required_area_m2: geometry::circle_area(
                    MIN_PITCH_FACTOR * diameter * (count as f64).sqrt(),
                ),
                available_area_m2: geometry::circle_area(ctx.footprint_limit_m),
                detail: "hole pattern cannot fit the chamber face".to_string(),
            });
        }
        warnings.push(format!(
            "hole pitch shrunk from {:.1} to {:.1} mm to fit the chamber face",
            m_to_mm(pitch),
            m_to_mm(shrunk_pitch)
        ));
        footprint = ctx.footprint_limit_m;
    }

    let velocity = injection_velocity(discharge_coefficient, ctx.density_kg_m3, drop);
    let reynolds_number = crate::reynolds(
        ctx.density_kg_m3,
        velocity,
        diameter,
        ctx.viscosity_pa_s,
    );
    hydraulic_warnings(ctx, drop, reynolds_number, &mut warnings);

    Ok(InjectorDesign {
        pressure_drop_pa: drop,
        exit_velocity_m_s: velocity,
        reynolds_number,
        discharge_coefficient,
        total_orifice_area_m2: total_area,
        footprint_diameter_m: footprint,
        geometry: InjectorGeometry::Showerhead {
            hole_count: count,
            hole_diameter_m: diameter,
            plate_thickness_m,
            length_to_diameter,
        },
        warnings,
    })
}

/// Search hole counts for a diameter within manufacturing bounds, preferring
/// a hole length-to-diameter ratio in the 3-5 range.
fn search_hole_count(
    total_area: f64,
    min_hole_diameter_m: f64,
    max_hole_diameter_m: f64,
    plate_thickness_m: f64,
    warnings: &mut Vec<String>,
) -> Result<(usize, f64), InjectorError> {
    let mut preferred: Option<(usize, f64, f64)> = None;
    let mut in_bounds: Option<(usize, f64, f64)> = None;

    for count in 1..=MAX_HOLE_COUNT {
        let diameter = geometry::diameter_from_area(total_area / count as f64);
        if diameter > max_hole_diameter_m {
            continue;
        }
        if diameter < min_hole_diameter_m {
            break;
        }
        let ratio = plate_thickness_m / diameter;
        let penalty = (ratio - TARGET_LENGTH_TO_DIAMETER).abs();
        if (3.0..=5.0).contains(&ratio) {
            if preferred.is_none_or(|(_, _, best)| penalty < best) {
                preferred = Some((count, diameter, penalty));
            }
        } else if in_bounds.is_none_or(|(_, _, best)| penalty < best) {
            in_bounds = Some((count, diameter, penalty));
        }
    }

    if let Some((count, diameter, _)) = preferred {
        return Ok((count, diameter));
    }
    if let Some((count, diameter, _)) = in_bounds {
        warnings.push(format!(
            "hole length-to-diameter {:.2} is outside the recommended 3-5 range",
            plate_thickness_m / diameter
        ));
        return Ok((count, diameter));
    }
    Err(InjectorError::InfeasibleGeometry {
        required_area_m2: total_area,
        available_area_m2: MAX_HOLE_COUNT as f64 * geometry::circle_area(max_hole_diameter_m),
        detail: format!(
            "no hole count up to {MAX_HOLE_COUNT} keeps the diameter within \
             {:.2}-{:.2} mm",
            m_to_mm(min_hole_diameter_m),
            m_to_mm(max_hole_diameter_m)
        ),
    })
}
