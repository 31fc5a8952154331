//! Fixed-point chamber-pressure equilibrium and the performance record.
//!
//! The solver runs in two phases. A design sizing pass resolves the nozzle
//! expansion, throat area, and grain geometry for the requested operating
//! point; the equilibrium pass then iterates chamber pressure until the mass
//! generated by combustion matches the mass the choked throat can pass.

use motor_config::{CombustionMode, FiniteAreaSpec, MotorClass, MotorConfiguration};
use motor_core::constants::G0;
use motor_core::geometry;

use crate::grain::{self, GrainGeometry};
use crate::{MAX_ITERATIONS, RELATIVE_TOLERANCE, SolverError, gas};

/// Largest expansion ratio the automatic nozzle sizing will produce.
pub const MAX_EXPANSION_RATIO: f64 = 512.0;

/// Wegstein factor bounds. Negative factors accelerate a slowly converging
/// substitution; factors near 1 damp a diverging feed coupling.
const WEGSTEIN_Q_MIN: f64 = -5.0;
const WEGSTEIN_Q_MAX: f64 = 0.99;

/// Hybrid iterates are held below this fraction of tank pressure so the
/// injector pressure drop never collapses mid-iteration.
const TANK_APPROACH_FRACTION: f64 = 0.99;

/// Exit pressures below this fraction of ambient are flagged as separation
/// risks (Summerfield criterion).
const SEPARATION_PRESSURE_FRACTION: f64 = 0.4;

/// Mutable state of the chamber-pressure iteration.
#[derive(Debug, Clone)]
pub struct SolverState {
    pub pressure_pa: f64,
    pub mass_flow_kg_s: f64,
    pub iterations: usize,
    pub converged: bool,
    pub residual: f64,
}

/// Converged steady-state performance of a motor design.
///
/// All fields are SI. Mass flows satisfy `total = oxidizer + fuel` exactly;
/// for solid motors the split follows the formulation O/F ratio.
#[derive(Debug, Clone)]
pub struct MotorPerformance {
    pub chamber_pressure_pa: f64,
    pub total_mass_flow_kg_s: f64,
    pub oxidizer_mass_flow_kg_s: f64,
    pub fuel_mass_flow_kg_s: f64,
    pub thrust_n: f64,
    pub specific_impulse_s: f64,
    pub characteristic_velocity_m_s: f64,
    pub thrust_coefficient: f64,
    pub exit_velocity_m_s: f64,
    pub exit_pressure_pa: f64,
    pub expansion_ratio: f64,
    pub throat_diameter_m: f64,
    pub exit_diameter_m: f64,
    pub chamber_diameter_m: f64,
    pub chamber_length_m: f64,
    pub chamber_volume_m3: f64,
    pub initial_port_diameter_m: f64,
    /// Final port estimate assuming the converged rate holds for the burn.
    pub final_port_diameter_m: f64,
    pub regression_rate_m_s: f64,
    pub fuel_mass_kg: f64,
    pub oxidizer_mass_kg: f64,
    pub total_propellant_mass_kg: f64,
    pub iterations: usize,
    pub residual: f64,
    /// Advisory findings in evaluation order.
    pub warnings: Vec<String>,
}

/// Nozzle expansion resolved from the configuration. The exit-to-chamber
/// pressure ratio is a pure function of the expansion ratio, so it stays
/// fixed while the equilibrium pressure moves.
#[derive(Debug, Clone)]
struct NozzleDesign {
    expansion_ratio: f64,
    pressure_ratio: f64,
    warnings: Vec<String>,
}

/// Design-point quantities derived once from the requested operating point.
#[derive(Debug, Clone, Copy)]
struct DesignPoint {
    throat_area_m2: f64,
    total_kg_s: f64,
    oxidizer_kg_s: f64,
    fuel_kg_s: f64,
}

/// Oxidizer feed anchored at the design pressure drop. The effective
/// discharge area is a property of the built injector and stays constant
/// across operating points.
#[derive(Debug, Clone, Copy)]
struct FeedAnchor {
    discharge_area_m2: f64,
    tank_pressure_pa: f64,
    density_kg_m3: f64,
}

/// One evaluation of the combustion-side mass balance.
#[derive(Debug, Clone, Copy)]
struct MassBalance {
    total_kg_s: f64,
    oxidizer_kg_s: f64,
    fuel_kg_s: f64,
    regression_rate_m_s: f64,
}

/// Size the motor for its design point and solve for the steady-state
/// operating equilibrium.
pub fn solve(config: &MotorConfiguration) -> Result<MotorPerformance, SolverError> {
    let sizing = size(config)?;
    let mut performance = solve_at_geometry(config, &sizing.geometry)?;
    let mut warnings = sizing.warnings;
    warnings.append(&mut performance.warnings);
    performance.warnings = warnings;
    Ok(performance)
}

/// Resolve the design-point grain geometry without running the equilibrium.
pub fn size(config: &MotorConfiguration) -> Result<grain::GrainSizing, SolverError> {
    let nozzle = design_nozzle(config)?;
    let design = design_point(config, &nozzle)?;
    grain::size_grain(
        config,
        design.throat_area_m2,
        design.total_kg_s,
        design.oxidizer_kg_s,
        design.fuel_kg_s,
    )
}

/// Solve the steady-state equilibrium for a fixed grain geometry.
///
/// This is the entry point the regression simulator steps through as the
/// port opens up; `solve` delegates here after sizing.
pub fn solve_at_geometry(
    config: &MotorConfiguration,
    grain: &GrainGeometry,
) -> Result<MotorPerformance, SolverError> {
    let gas_props = &config.gas;
    let nozzle = design_nozzle(config)?;
    let design = design_point(config, &nozzle)?;
    let c_star =
        gas::characteristic_velocity(gas_props.gamma, gas_props.gas_constant_j_kg_k, gas_props.chamber_temperature_k);
    let feed = feed_anchor(config, &design)?;

    let (state, balance) = converge(config, grain, c_star, feed.as_ref())?;

    let mut warnings = nozzle.warnings.clone();
    let exit_pressure = state.pressure_pa * nozzle.pressure_ratio;
    if exit_pressure < SEPARATION_PRESSURE_FRACTION * config.atmospheric_pressure_pa {
        warnings.push(format!(
            "exit pressure {:.0} Pa is below {:.0}% of ambient; the nozzle may separate",
            exit_pressure,
            SEPARATION_PRESSURE_FRACTION * 100.0
        ));
    }

    let thrust_coefficient = gas::thrust_coefficient(
        gas_props.gamma,
        exit_pressure,
        state.pressure_pa,
        config.atmospheric_pressure_pa,
        nozzle.expansion_ratio,
    );
    let thrust = config.nozzle.efficiency
        * thrust_coefficient
        * state.pressure_pa
        * grain.throat_area_m2;
    let specific_impulse = thrust / (balance.total_kg_s * G0);
    let exit_velocity = gas::exit_velocity(
        gas_props.gamma,
        gas_props.gas_constant_j_kg_k,
        gas_props.chamber_temperature_k,
        nozzle.pressure_ratio,
    );

    let chamber_diameter = config
        .chamber
        .diameter_m
        .unwrap_or(grain.outer_diameter_m * grain::CHAMBER_CLEARANCE);
    let chamber_volume = config.chamber.characteristic_length_m * grain.throat_area_m2;
    let port_volume = geometry::cylinder_volume(grain.port_diameter_m, grain.length_m);
    let free_volume = (chamber_volume - port_volume).max(0.0);
    let chamber_length = grain.length_m + free_volume / geometry::circle_area(chamber_diameter);

    let fuel_mass = balance.fuel_kg_s * config.burn_time_s;
    let oxidizer_mass = balance.oxidizer_kg_s * config.burn_time_s;

    Ok(MotorPerformance {
        chamber_pressure_pa: state.pressure_pa,
        total_mass_flow_kg_s: balance.total_kg_s,
        oxidizer_mass_flow_kg_s: balance.oxidizer_kg_s,
        fuel_mass_flow_kg_s: balance.fuel_kg_s,
        thrust_n: thrust,
        specific_impulse_s: specific_impulse,
        characteristic_velocity_m_s: c_star,
        thrust_coefficient,
        exit_velocity_m_s: exit_velocity,
        exit_pressure_pa: exit_pressure,
        expansion_ratio: nozzle.expansion_ratio,
        throat_diameter_m: geometry::diameter_from_area(grain.throat_area_m2),
        exit_diameter_m: geometry::diameter_from_area(
            nozzle.expansion_ratio * grain.throat_area_m2,
        ),
        chamber_diameter_m: chamber_diameter,
        chamber_length_m: chamber_length,
        chamber_volume_m3: chamber_volume,
        initial_port_diameter_m: grain.port_diameter_m,
        final_port_diameter_m: grain.port_diameter_m
            + 2.0 * balance.regression_rate_m_s * config.burn_time_s,
        regression_rate_m_s: balance.regression_rate_m_s,
        fuel_mass_kg: fuel_mass,
        oxidizer_mass_kg: oxidizer_mass,
        total_propellant_mass_kg: fuel_mass + oxidizer_mass,
        iterations: state.iterations,
        residual: state.residual,
        warnings,
    })
}

/// Resolve the nozzle expansion ratio and its fixed pressure ratio.
///
/// When the ratio is not supplied the nozzle is sized for ambient exit
/// pressure by bisecting the expansion ratio, reusing the solver tolerance
/// and iteration contract.
fn design_nozzle(config: &MotorConfiguration) -> Result<NozzleDesign, SolverError> {
    let gamma = config.gas.gamma;
    let mut warnings = Vec::new();

    let expansion_ratio = match config.nozzle.expansion_ratio {
        Some(ratio) => ratio,
        None => {
            let target = config.atmospheric_pressure_pa / config.chamber_pressure_pa;
            if target >= gas::critical_pressure_ratio(gamma) {
                return Err(SolverError::Infeasible(format!(
                    "chamber pressure {:.0} Pa is too low to expand supersonically to \
                     ambient {:.0} Pa",
                    config.chamber_pressure_pa, config.atmospheric_pressure_pa
                )));
            }
            if exit_pressure_ratio(MAX_EXPANSION_RATIO, gamma) > target {
                warnings.push(format!(
                    "automatic expansion ratio clamped at {MAX_EXPANSION_RATIO}; the exit \
                     stays above ambient pressure"
                ));
                MAX_EXPANSION_RATIO
            } else {
                // The exit pressure falls monotonically with the expansion
                // ratio, so the ambient match is a bracketed root.
                gas::bisect(1.0 + 1.0e-6, MAX_EXPANSION_RATIO, |ratio| {
                    target - exit_pressure_ratio(ratio, gamma)
                })
            }
        }
    };

    let pressure_ratio = exit_pressure_ratio(expansion_ratio, gamma);
    Ok(NozzleDesign {
        expansion_ratio,
        pressure_ratio,
        warnings,
    })
}

/// Exit-to-chamber pressure ratio for a supersonic expansion ratio.
fn exit_pressure_ratio(expansion_ratio: f64, gamma: f64) -> f64 {
    gas::pressure_ratio(gas::exit_mach(expansion_ratio, gamma), gamma)
}

/// Throat area and design mass flows for the requested operating point.
fn design_point(
    config: &MotorConfiguration,
    nozzle: &NozzleDesign,
) -> Result<DesignPoint, SolverError> {
    let pc = config.chamber_pressure_pa;
    let exit_pressure = pc * nozzle.pressure_ratio;
    let thrust_coefficient = gas::thrust_coefficient(
        config.gas.gamma,
        exit_pressure,
        pc,
        config.atmospheric_pressure_pa,
        nozzle.expansion_ratio,
    );
    if thrust_coefficient <= 0.0 {
        return Err(SolverError::Infeasible(format!(
            "nozzle is grossly over-expanded at the design point \
             (thrust coefficient {thrust_coefficient:.2})"
        )));
    }

    let throat_area = config.thrust_n / (config.nozzle.efficiency * thrust_coefficient * pc);
    let c_star = gas::characteristic_velocity(
        config.gas.gamma,
        config.gas.gas_constant_j_kg_k,
        config.gas.chamber_temperature_k,
    );
    let total = gas::throat_mass_flow(pc, throat_area, c_star);
    let oxidizer = total * config.of_ratio / (1.0 + config.of_ratio);
    Ok(DesignPoint {
        throat_area_m2: throat_area,
        total_kg_s: total,
        oxidizer_kg_s: oxidizer,
        fuel_kg_s: total - oxidizer,
    })
}

/// Anchor the oxidizer feed at the design pressure drop (hybrids only).
fn feed_anchor(
    config: &MotorConfiguration,
    design: &DesignPoint,
) -> Result<Option<FeedAnchor>, SolverError> {
    match config.class {
        MotorClass::Solid => Ok(None),
        MotorClass::Hybrid => {
            let Some(tank) = config.tank_pressure_pa else {
                return Err(SolverError::Infeasible(
                    "hybrid motor is missing a tank pressure".to_string(),
                ));
            };
            let drop = tank - config.chamber_pressure_pa;
            let density = config.oxidizer.density_kg_m3;
            let discharge_area = design.oxidizer_kg_s / (2.0 * density * drop).sqrt();
            Ok(Some(FeedAnchor {
                discharge_area_m2: discharge_area,
                tank_pressure_pa: tank,
                density_kg_m3: density,
            }))
        }
    }
}

/// Iterate chamber pressure to the combustion/throat equilibrium.
fn converge(
    config: &MotorConfiguration,
    grain: &GrainGeometry,
    c_star: f64,
    feed: Option<&FeedAnchor>,
) -> Result<(SolverState, MassBalance), SolverError> {
    let gamma = config.gas.gamma;
    let temperature_factor = gas::temperature_correction(config.initial_temperature_k);
    let contraction_factor = match config.combustion {
        CombustionMode::FiniteArea(FiniteAreaSpec::ContractionRatio(ratio)) => {
            Some(gas::finite_area_pressure_factor(gas::chamber_mach(ratio, gamma), gamma))
        }
        _ => None,
    };

    let mut state = SolverState {
        pressure_pa: 0.9 * config.chamber_pressure_pa,
        mass_flow_kg_s: 0.0,
        iterations: 0,
        converged: false,
        residual: f64::INFINITY,
    };
    let mut history: Option<(f64, f64)> = None;

    for iteration in 1..=MAX_ITERATIONS {
        let balance = mass_balance(config, grain, state.pressure_pa, feed, temperature_factor)?;
        let mut implied =
            balance.total_kg_s * c_star / grain.throat_area_m2;
        implied *= match (contraction_factor, &config.combustion) {
            (Some(factor), _) => factor,
            (None, CombustionMode::FiniteArea(FiniteAreaSpec::MassFlux(flux))) => {
                let mach = mass_flux_mach(*flux, state.pressure_pa, config);
                if mach >= 1.0 {
                    return Err(SolverError::Infeasible(format!(
                        "chamber mass flux {flux} kg/m²/s chokes the chamber \
                         (Mach {mach:.2})"
                    )));
                }
                gas::finite_area_pressure_factor(mach, gamma)
            }
            _ => 1.0,
        };
        if !implied.is_finite() || implied <= 0.0 {
            return Err(SolverError::Infeasible(format!(
                "chamber pressure iteration left the physical domain ({implied} Pa)"
            )));
        }

        let residual = ((implied - state.pressure_pa) / state.pressure_pa).abs();
        if residual < RELATIVE_TOLERANCE {
            state = SolverState {
                pressure_pa: implied,
                mass_flow_kg_s: balance.total_kg_s,
                iterations: iteration,
                converged: true,
                residual,
            };
            break;
        }

        // Wegstein update: the secant slope of the balance picks the
        // factor, so a stiff feed coupling (slope well below -1) gets
        // damped instead of oscillating out of the feasible band.
        let q = match history {
            Some((previous_pressure, previous_implied))
                if (state.pressure_pa - previous_pressure).abs()
                    > f64::EPSILON * state.pressure_pa =>
            {
                let slope = (implied - previous_implied)
                    / (state.pressure_pa - previous_pressure);
                (slope / (slope - 1.0)).clamp(WEGSTEIN_Q_MIN, WEGSTEIN_Q_MAX)
            }
            Some(_) => 0.5,
            None => 0.0,
        };
        history = Some((state.pressure_pa, implied));

        let mut next = q * state.pressure_pa + (1.0 - q) * implied;
        if !next.is_finite() || next <= 0.0 {
            next = implied;
        }
        if let Some(feed) = feed {
            next = next.min(TANK_APPROACH_FRACTION * feed.tank_pressure_pa);
        }

        state = SolverState {
            pressure_pa: next,
            mass_flow_kg_s: balance.total_kg_s,
            iterations: iteration,
            converged: false,
            residual,
        };
    }

    if !state.converged {
        return Err(SolverError::Convergence {
            iterations: state.iterations,
            last_pressure_pa: state.pressure_pa,
            residual: state.residual,
        });
    }
    if state.pressure_pa <= config.atmospheric_pressure_pa {
        return Err(SolverError::Infeasible(format!(
            "equilibrium chamber pressure {:.0} Pa fell below ambient {:.0} Pa",
            state.pressure_pa, config.atmospheric_pressure_pa
        )));
    }

    // Report the balance at the converged pressure.
    let balance = mass_balance(config, grain, state.pressure_pa, feed, temperature_factor)?;
    state.mass_flow_kg_s = balance.total_kg_s;
    Ok((state, balance))
}

/// Combustion-side mass balance at a candidate chamber pressure.
fn mass_balance(
    config: &MotorConfiguration,
    grain: &GrainGeometry,
    pressure: f64,
    feed: Option<&FeedAnchor>,
    temperature_factor: f64,
) -> Result<MassBalance, SolverError> {
    match config.class {
        MotorClass::Hybrid => {
            let Some(feed) = feed else {
                return Err(SolverError::Infeasible(
                    "hybrid motor is missing an oxidizer feed anchor".to_string(),
                ));
            };
            let drop = (feed.tank_pressure_pa - pressure).max(0.0);
            let oxidizer = feed.discharge_area_m2 * (2.0 * feed.density_kg_m3 * drop).sqrt();
            let flux = oxidizer / geometry::circle_area(grain.port_diameter_m);
            let rate =
                temperature_factor * config.regression.a * flux.powf(config.regression.n);
            let fuel = config.fuel.density_kg_m3
                * geometry::cylinder_lateral_area(grain.port_diameter_m, grain.length_m)
                * rate;
            Ok(MassBalance {
                total_kg_s: oxidizer + fuel,
                oxidizer_kg_s: oxidizer,
                fuel_kg_s: fuel,
                regression_rate_m_s: rate,
            })
        }
        MotorClass::Solid => {
            let rate =
                temperature_factor * config.regression.a * pressure.powf(config.regression.n);
            let total = config.fuel.density_kg_m3
                * geometry::cylinder_lateral_area(grain.port_diameter_m, grain.length_m)
                * rate;
            let oxidizer = total * config.of_ratio / (1.0 + config.of_ratio);
            Ok(MassBalance {
                total_kg_s: total,
                oxidizer_kg_s: oxidizer,
                fuel_kg_s: total - oxidizer,
                regression_rate_m_s: rate,
            })
        }
    }
}

/// Chamber Mach number implied by a declared chamber mass flux.
fn mass_flux_mach(flux: f64, pressure: f64, config: &MotorConfiguration) -> f64 {
    let gas_props = &config.gas;
    (flux / pressure)
        * (gas_props.gas_constant_j_kg_k * gas_props.chamber_temperature_k / gas_props.gamma)
            .sqrt()
}
