//! Validation of raw motor requests into immutable, solver-ready configurations.
//!
//! Validation is aggregated: every failed rule contributes one issue string and
//! the full list is reported in a single [`ValidationError`]. Advisory findings
//! that do not block a solve are collected as warnings on the configuration.

use thiserror::Error;

use crate::model::{CombustionRequest, InjectorRequest, MotorClass, MotorRequest};

/// Engineering defaults applied to omitted request fields.
pub mod defaults {
    use motor_core::constants;

    pub const ATMOSPHERIC_PRESSURE_PA: f64 = constants::STANDARD_PRESSURE_PA;
    pub const INITIAL_TEMPERATURE_K: f64 = constants::REFERENCE_TEMPERATURE_K;

    pub const GAMMA: f64 = 1.2;
    pub const GAS_CONSTANT_J_KG_K: f64 = 320.0;
    pub const CHAMBER_TEMPERATURE_K: f64 = 3000.0;

    pub const CONICAL_NOZZLE_EFFICIENCY: f64 = 0.983;
    pub const BELL_NOZZLE_EFFICIENCY: f64 = 0.985;

    pub const CHARACTERISTIC_LENGTH_M: f64 = 1.2;
    pub const TARGET_OXIDIZER_FLUX_KG_M2_S: f64 = 350.0;

    pub const HYBRID_FUEL_NAME: &str = "HTPB";
    pub const HYBRID_FUEL_DENSITY_KG_M3: f64 = 930.0;
    pub const HYBRID_REGRESSION_A: f64 = 1.55e-4;
    pub const HYBRID_REGRESSION_N: f64 = 0.5;

    pub const SOLID_PROPELLANT_NAME: &str = "APCP";
    pub const SOLID_PROPELLANT_DENSITY_KG_M3: f64 = 1750.0;
    pub const SOLID_BURN_RATE_A: f64 = 2.0e-5;
    pub const SOLID_BURN_RATE_N: f64 = 0.35;

    pub const OXIDIZER_NAME: &str = "N2O";
    pub const OXIDIZER_DENSITY_KG_M3: f64 = 750.0;
    pub const OXIDIZER_VISCOSITY_PA_S: f64 = 6.0e-5;

    pub const SHOWERHEAD_TARGET_VELOCITY_M_S: f64 = 25.0;
    pub const SHOWERHEAD_DISCHARGE_COEFFICIENT: f64 = 0.65;
    pub const MIN_HOLE_DIAMETER_M: f64 = 5.0e-4;
    pub const MAX_HOLE_DIAMETER_M: f64 = 2.5e-3;
    pub const PLATE_THICKNESS_M: f64 = 4.0e-3;

    pub const PINTLE_DISCHARGE_COEFFICIENT: f64 = 0.70;

    pub const SWIRL_SLOT_COUNT: usize = 6;
    pub const SWIRL_HALF_ANGLE_DEG: f64 = 45.0;
    pub const SWIRL_DISCHARGE_COEFFICIENT: f64 = 0.75;
}

/// A validated, immutable motor configuration.
///
/// All fields are in SI units. Construction goes through [`validate`]; the
/// solver crates treat this record as read-only input.
#[derive(Debug, Clone)]
pub struct MotorConfiguration {
    pub name: String,
    pub class: MotorClass,
    pub thrust_n: f64,
    pub burn_time_s: f64,
    pub of_ratio: f64,
    pub chamber_pressure_pa: f64,
    /// Present for hybrids; `None` for solid motors.
    pub tank_pressure_pa: Option<f64>,
    pub atmospheric_pressure_pa: f64,
    pub initial_temperature_k: f64,
    pub gas: GasProperties,
    pub nozzle: NozzleSpec,
    pub grain: GrainSpec,
    pub regression: RegressionLaw,
    pub fuel: FuelProperties,
    pub oxidizer: OxidizerProperties,
    pub injector: Option<InjectorSpec>,
    pub chamber: ChamberSpec,
    pub combustion: CombustionMode,
    /// Advisory findings collected during validation, in rule order.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct GasProperties {
    pub gamma: f64,
    pub gas_constant_j_kg_k: f64,
    pub chamber_temperature_k: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NozzleFamily {
    Conical,
    Bell,
}

#[derive(Debug, Clone, Copy)]
pub struct NozzleSpec {
    pub family: NozzleFamily,
    /// `None` requests automatic sizing for ambient exit pressure.
    pub expansion_ratio: Option<f64>,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct GrainSpec {
    pub port_diameter_m: Option<f64>,
    pub outer_diameter_m: Option<f64>,
    pub length_m: Option<f64>,
    pub target_oxidizer_flux_kg_m2_s: f64,
}

/// Regression law `r = a * x^n` with `x` defined per motor class.
#[derive(Debug, Clone, Copy)]
pub struct RegressionLaw {
    pub a: f64,
    pub n: f64,
}

#[derive(Debug, Clone)]
pub struct FuelProperties {
    pub name: String,
    pub density_kg_m3: f64,
}

#[derive(Debug, Clone)]
pub struct OxidizerProperties {
    pub name: String,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    pub vapor_pressure_pa: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChamberSpec {
    pub characteristic_length_m: f64,
    pub diameter_m: Option<f64>,
}

/// Chamber combustion model selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombustionMode {
    InfiniteArea,
    FiniteArea(FiniteAreaSpec),
}

/// Finite-area combustion input. Exactly one of the two forms is supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FiniteAreaSpec {
    ContractionRatio(f64),
    MassFlux(f64),
}

/// Validated injector specification with family defaults applied.
#[derive(Debug, Clone)]
pub enum InjectorSpec {
    Showerhead {
        target_velocity_m_s: f64,
        discharge_coefficient: f64,
        min_hole_diameter_m: f64,
        max_hole_diameter_m: f64,
        plate_thickness_m: f64,
        hole_count: Option<usize>,
    },
    Pintle {
        pintle_diameter_m: f64,
        discharge_coefficient: f64,
        pressure_drop_pa: Option<f64>,
    },
    Swirl {
        slot_count: usize,
        spray_half_angle_deg: f64,
        discharge_coefficient: f64,
        pressure_drop_pa: Option<f64>,
    },
}

/// Aggregated validation failure listing every violated rule.
#[derive(Debug, Error)]
#[error("motor `{name}` failed validation: {}", .issues.join("; "))]
pub struct ValidationError {
    pub name: String,
    pub issues: Vec<String>,
}

/// Validate a raw request, fill defaults, and return the solver-ready
/// configuration. All violated rules are reported together.
pub fn validate(request: MotorRequest) -> Result<MotorConfiguration, ValidationError> {
    let name = request.name.clone();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let class = request.class;
    let gas_req = request.gas.clone().unwrap_or_default();
    let nozzle_req = request.nozzle.clone().unwrap_or_default();
    let grain_req = request.grain.clone().unwrap_or_default();
    let regression_req = request.regression.clone().unwrap_or_default();
    let fuel_req = request.fuel.clone().unwrap_or_default();
    let oxidizer_req = request.oxidizer.clone().unwrap_or_default();
    let chamber_req = request.chamber.clone().unwrap_or_default();
    let environment_req = request.environment.clone().unwrap_or_default();

    let family = match nozzle_req.family.as_deref() {
        None | Some("conical") => NozzleFamily::Conical,
        Some("bell") => NozzleFamily::Bell,
        Some(other) => {
            issues.push(format!(
                "nozzle family `{other}` is not supported (expected `conical` or `bell`)"
            ));
            NozzleFamily::Conical
        }
    };
    let nozzle = NozzleSpec {
        family,
        expansion_ratio: nozzle_req.expansion_ratio.filter(|ratio| *ratio != 0.0),
        efficiency: nozzle_req.efficiency.unwrap_or(match family {
            NozzleFamily::Conical => defaults::CONICAL_NOZZLE_EFFICIENCY,
            NozzleFamily::Bell => defaults::BELL_NOZZLE_EFFICIENCY,
        }),
    };

    let (fuel_name, fuel_density, regression_a, regression_n) = match class {
        MotorClass::Hybrid => (
            defaults::HYBRID_FUEL_NAME,
            defaults::HYBRID_FUEL_DENSITY_KG_M3,
            defaults::HYBRID_REGRESSION_A,
            defaults::HYBRID_REGRESSION_N,
        ),
        MotorClass::Solid => (
            defaults::SOLID_PROPELLANT_NAME,
            defaults::SOLID_PROPELLANT_DENSITY_KG_M3,
            defaults::SOLID_BURN_RATE_A,
            defaults::SOLID_BURN_RATE_N,
        ),
    };

    let tank_pressure_pa = match class {
        MotorClass::Hybrid => {
            if request.tank_pressure_pa.is_none() {
                issues.push("tank_pressure_pa is required for hybrid motors".to_string());
            }
            request.tank_pressure_pa
        }
        MotorClass::Solid => {
            if request.tank_pressure_pa.is_some() {
                warnings.push("tank_pressure_pa is ignored for solid motors".to_string());
            }
            None
        }
    };

    let injector = build_injector(class, request.injector.clone(), &mut issues, &mut warnings);
    let combustion = build_combustion(request.combustion.clone(), &mut issues);

    let mut configuration = MotorConfiguration {
        name: name.clone(),
        class,
        thrust_n: request.thrust_n,
        burn_time_s: request.burn_time_s,
        of_ratio: request.of_ratio,
        chamber_pressure_pa: request.chamber_pressure_pa,
        tank_pressure_pa,
        atmospheric_pressure_pa: environment_req
            .atmospheric_pressure_pa
            .unwrap_or(defaults::ATMOSPHERIC_PRESSURE_PA),
        initial_temperature_k: environment_req
            .initial_temperature_k
            .unwrap_or(defaults::INITIAL_TEMPERATURE_K),
        gas: GasProperties {
            gamma: gas_req.gamma.unwrap_or(defaults::GAMMA),
            gas_constant_j_kg_k: gas_req
                .gas_constant_j_kg_k
                .unwrap_or(defaults::GAS_CONSTANT_J_KG_K),
            chamber_temperature_k: gas_req
                .chamber_temperature_k
                .unwrap_or(defaults::CHAMBER_TEMPERATURE_K),
        },
        nozzle,
        grain: GrainSpec {
            port_diameter_m: grain_req.port_diameter_m,
            outer_diameter_m: grain_req.outer_diameter_m,
            length_m: grain_req.length_m,
            target_oxidizer_flux_kg_m2_s: grain_req
                .target_oxidizer_flux_kg_m2_s
                .unwrap_or(defaults::TARGET_OXIDIZER_FLUX_KG_M2_S),
        },
        regression: RegressionLaw {
            a: regression_req.a.unwrap_or(regression_a),
            n: regression_req.n.unwrap_or(regression_n),
        },
        fuel: FuelProperties {
            name: fuel_req.name.unwrap_or_else(|| fuel_name.to_string()),
            density_kg_m3: fuel_req.density_kg_m3.unwrap_or(fuel_density),
        },
        oxidizer: OxidizerProperties {
            name: oxidizer_req
                .name
                .unwrap_or_else(|| defaults::OXIDIZER_NAME.to_string()),
            density_kg_m3: oxidizer_req
                .density_kg_m3
                .unwrap_or(defaults::OXIDIZER_DENSITY_KG_M3),
            viscosity_pa_s: oxidizer_req
                .viscosity_pa_s
                .unwrap_or(defaults::OXIDIZER_VISCOSITY_PA_S),
            vapor_pressure_pa: oxidizer_req.vapor_pressure_pa,
        },
        injector,
        chamber: ChamberSpec {
            characteristic_length_m: chamber_req
                .characteristic_length_m
                .unwrap_or(defaults::CHARACTERISTIC_LENGTH_M),
            diameter_m: chamber_req.diameter_m,
        },
        combustion,
        warnings: Vec::new(),
    };

    if !issues.is_empty() {
        return Err(ValidationError { name, issues });
    }

    warnings.extend(check(&configuration)?);
    configuration.warnings = warnings;
    Ok(configuration)
}

/// Re-check the numeric and relational rules on an already-built
/// configuration. Returns the advisory warnings the rules produce.
///
/// This is the entry point used when a configuration is perturbed after
/// initial validation (e.g. by uncertainty sampling).
pub fn check(configuration: &MotorConfiguration) -> Result<Vec<String>, ValidationError> {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    range(&mut issues, "thrust_n", configuration.thrust_n, 1.0e-1, 5.0e6);
    range(
        &mut issues,
        "burn_time_s",
        configuration.burn_time_s,
        1.0e-3,
        300.0,
    );
    if !configuration.of_ratio.is_finite() || configuration.of_ratio <= 0.0 {
        issues.push(format!(
            "of_ratio must be positive (got {})",
            configuration.of_ratio
        ));
    } else if configuration.of_ratio > 20.0 {
        issues.push(format!(
            "of_ratio must not exceed 20 (got {})",
            configuration.of_ratio
        ));
    }
    range(
        &mut issues,
        "chamber_pressure_pa",
        configuration.chamber_pressure_pa,
        1.0e5,
        2.0e7,
    );
    range(
        &mut issues,
        "atmospheric_pressure_pa",
        configuration.atmospheric_pressure_pa,
        1.0,
        2.0e5,
    );
    range(
        &mut issues,
        "initial_temperature_k",
        configuration.initial_temperature_k,
        200.0,
        400.0,
    );

    if configuration.chamber_pressure_pa <= configuration.atmospheric_pressure_pa {
        issues.push(format!(
            "chamber_pressure_pa ({:.0}) must exceed atmospheric_pressure_pa ({:.0})",
            configuration.chamber_pressure_pa, configuration.atmospheric_pressure_pa
        ));
    }

    if let Some(tank) = configuration.tank_pressure_pa {
        range(&mut issues, "tank_pressure_pa", tank, 1.0e5, 5.0e7);
        if tank <= configuration.chamber_pressure_pa {
            issues.push(format!(
                "tank_pressure_pa ({:.0}) must exceed chamber_pressure_pa ({:.0})",
                tank, configuration.chamber_pressure_pa
            ));
        } else if tank < 1.2 * configuration.chamber_pressure_pa {
            warnings.push(format!(
                "oxidizer tank margin is {:.1}% of chamber pressure; at least 20% is recommended",
                (tank / configuration.chamber_pressure_pa - 1.0) * 100.0
            ));
        }
        if let Some(vapor) = configuration.oxidizer.vapor_pressure_pa {
            if tank <= vapor {
                warnings.push(format!(
                    "tank pressure ({:.0} Pa) does not exceed oxidizer vapor pressure ({:.0} Pa); \
                     the feed may flash-boil",
                    tank, vapor
                ));
            }
        }
    }

    range(&mut issues, "gas.gamma", configuration.gas.gamma, 1.01, 1.67);
    range(
        &mut issues,
        "gas.gas_constant_j_kg_k",
        configuration.gas.gas_constant_j_kg_k,
        100.0,
        700.0,
    );
    range(
        &mut issues,
        "gas.chamber_temperature_k",
        configuration.gas.chamber_temperature_k,
        1200.0,
        4500.0,
    );

    range(&mut issues, "regression.a", configuration.regression.a, 1.0e-9, 0.1);
    range(&mut issues, "regression.n", configuration.regression.n, 1.0e-2, 1.5);
    if configuration.regression.n >= 0.9 && configuration.regression.n <= 1.5 {
        warnings.push(format!(
            "regression exponent n = {:.2} is at or above 0.9; the pressure equilibrium may \
             not stabilise",
            configuration.regression.n
        ));
    }

    range(
        &mut issues,
        "fuel.density_kg_m3",
        configuration.fuel.density_kg_m3,
        100.0,
        5000.0,
    );
    range(
        &mut issues,
        "oxidizer.density_kg_m3",
        configuration.oxidizer.density_kg_m3,
        100.0,
        5000.0,
    );
    range(
        &mut issues,
        "oxidizer.viscosity_pa_s",
        configuration.oxidizer.viscosity_pa_s,
        1.0e-7,
        1.0,
    );
    if let Some(vapor) = configuration.oxidizer.vapor_pressure_pa {
        range(&mut issues, "oxidizer.vapor_pressure_pa", vapor, 1.0e3, 1.0e8);
    }

    range(
        &mut issues,
        "chamber.characteristic_length_m",
        configuration.chamber.characteristic_length_m,
        0.2,
        5.0,
    );
    if let Some(diameter) = configuration.chamber.diameter_m {
        range(&mut issues, "chamber.diameter_m", diameter, 0.02, 2.0);
    }

    if let Some(port) = configuration.grain.port_diameter_m {
        range(&mut issues, "grain.port_diameter_m", port, 1.0e-3, 1.0);
    }
    if let Some(outer) = configuration.grain.outer_diameter_m {
        range(&mut issues, "grain.outer_diameter_m", outer, 1.0e-3, 2.0);
    }
    if let (Some(port), Some(outer)) = (
        configuration.grain.port_diameter_m,
        configuration.grain.outer_diameter_m,
    ) {
        if port >= outer {
            issues.push(format!(
                "grain.port_diameter_m ({port}) must be smaller than grain.outer_diameter_m \
                 ({outer})"
            ));
        }
    }
    if let Some(length) = configuration.grain.length_m {
        range(&mut issues, "grain.length_m", length, 1.0e-2, 10.0);
    }
    range(
        &mut issues,
        "grain.target_oxidizer_flux_kg_m2_s",
        configuration.grain.target_oxidizer_flux_kg_m2_s,
        10.0,
        1000.0,
    );

    range(
        &mut issues,
        "nozzle.efficiency",
        configuration.nozzle.efficiency,
        0.5,
        1.0,
    );
    if let Some(ratio) = configuration.nozzle.expansion_ratio {
        if ratio < 1.0 {
            issues.push(format!(
                "nozzle.expansion_ratio ({ratio}) must be at least 1 (omit it for automatic \
                 sizing)"
            ));
        }
    }

    check_injector(configuration.injector.as_ref(), &mut issues);
    check_combustion(&configuration.combustion, &mut issues);

    if issues.is_empty() {
        Ok(warnings)
    } else {
        Err(ValidationError {
            name: configuration.name.clone(),
            issues,
        })
    }
}

fn build_injector(
    class: MotorClass,
    request: Option<InjectorRequest>,
    issues: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> Option<InjectorSpec> {
    let request = match (class, request) {
        (MotorClass::Solid, Some(_)) => {
            warnings.push("injector section is ignored for solid motors".to_string());
            return None;
        }
        (MotorClass::Solid, None) => return None,
        (MotorClass::Hybrid, None) => {
            issues.push("hybrid motors require an [injector] table".to_string());
            return None;
        }
        (MotorClass::Hybrid, Some(request)) => request,
    };

    match request {
        InjectorRequest::Showerhead {
            target_velocity_m_s,
            discharge_coefficient,
            min_hole_diameter_m,
            max_hole_diameter_m,
            plate_thickness_m,
            hole_count,
        } => Some(InjectorSpec::Showerhead {
            target_velocity_m_s: target_velocity_m_s
                .unwrap_or(defaults::SHOWERHEAD_TARGET_VELOCITY_M_S),
            discharge_coefficient: discharge_coefficient
                .unwrap_or(defaults::SHOWERHEAD_DISCHARGE_COEFFICIENT),
            min_hole_diameter_m: min_hole_diameter_m.unwrap_or(defaults::MIN_HOLE_DIAMETER_M),
            max_hole_diameter_m: max_hole_diameter_m.unwrap_or(defaults::MAX_HOLE_DIAMETER_M),
            plate_thickness_m: plate_thickness_m.unwrap_or(defaults::PLATE_THICKNESS_M),
            hole_count,
        }),
        InjectorRequest::Pintle {
            pintle_diameter_m,
            discharge_coefficient,
            pressure_drop_pa,
        } => Some(InjectorSpec::Pintle {
            pintle_diameter_m,
            discharge_coefficient: discharge_coefficient
                .unwrap_or(defaults::PINTLE_DISCHARGE_COEFFICIENT),
            pressure_drop_pa,
        }),
        InjectorRequest::Swirl {
            slot_count,
            spray_half_angle_deg,
            discharge_coefficient,
            pressure_drop_pa,
        } => Some(InjectorSpec::Swirl {
            slot_count: slot_count.unwrap_or(defaults::SWIRL_SLOT_COUNT),
            spray_half_angle_deg: spray_half_angle_deg.unwrap_or(defaults::SWIRL_HALF_ANGLE_DEG),
            discharge_coefficient: discharge_coefficient
                .unwrap_or(defaults::SWIRL_DISCHARGE_COEFFICIENT),
            pressure_drop_pa,
        }),
        InjectorRequest::Unsupported => {
            issues.push(
                "injector type is not supported (expected `showerhead`, `pintle`, or `swirl`)"
                    .to_string(),
            );
            None
        }
    }
}

fn build_combustion(
    request: Option<CombustionRequest>,
    issues: &mut Vec<String>,
) -> CombustionMode {
    let Some(request) = request else {
        return CombustionMode::InfiniteArea;
    };
    match (request.contraction_ratio, request.chamber_mass_flux_kg_m2_s) {
        (Some(ratio), None) => CombustionMode::FiniteArea(FiniteAreaSpec::ContractionRatio(ratio)),
        (None, Some(flux)) => CombustionMode::FiniteArea(FiniteAreaSpec::MassFlux(flux)),
        (None, None) => {
            issues.push(
                "a [combustion] table requires either contraction_ratio or \
                 chamber_mass_flux_kg_m2_s"
                    .to_string(),
            );
            CombustionMode::InfiniteArea
        }
        (Some(_), Some(_)) => {
            issues.push(
                "combustion.contraction_ratio and combustion.chamber_mass_flux_kg_m2_s are \
                 mutually exclusive"
                    .to_string(),
            );
            CombustionMode::InfiniteArea
        }
    }
}

fn check_injector(spec: Option<&InjectorSpec>, issues: &mut Vec<String>) {
    match spec {
        None => {}
        Some(InjectorSpec::Showerhead {
            target_velocity_m_s,
            discharge_coefficient,
            min_hole_diameter_m,
            max_hole_diameter_m,
            plate_thickness_m,
            hole_count,
        }) => {
            range(
                issues,
                "injector.target_velocity_m_s",
                *target_velocity_m_s,
                1.0,
                300.0,
            );
            range(
                issues,
                "injector.discharge_coefficient",
                *discharge_coefficient,
                0.1,
                1.0,
            );
            range(
                issues,
                "injector.min_hole_diameter_m",
                *min_hole_diameter_m,
                1.0e-5,
                5.0e-2,
            );
            range(
                issues,
                "injector.max_hole_diameter_m",
                *max_hole_diameter_m,
                1.0e-5,
                5.0e-2,
            );
            if min_hole_diameter_m > max_hole_diameter_m {
                issues.push(format!(
                    "injector.min_hole_diameter_m ({min_hole_diameter_m}) must not exceed \
                     injector.max_hole_diameter_m ({max_hole_diameter_m})"
                ));
            }
            range(
                issues,
                "injector.plate_thickness_m",
                *plate_thickness_m,
                5.0e-4,
                1.0e-1,
            );
            if hole_count == &Some(0) {
                issues.push("injector.hole_count must be at least 1".to_string());
            }
        }
        Some(InjectorSpec::Pintle {
            pintle_diameter_m,
            discharge_coefficient,
            pressure_drop_pa,
        }) => {
            range(
                issues,
                "injector.pintle_diameter_m",
                *pintle_diameter_m,
                1.0e-3,
                0.5,
            );
            range(
                issues,
                "injector.discharge_coefficient",
                *discharge_coefficient,
                0.1,
                1.0,
            );
            if let Some(drop) = pressure_drop_pa {
                range(issues, "injector.pressure_drop_pa", *drop, 1.0e3, 1.0e7);
            }
        }
        Some(InjectorSpec::Swirl {
            slot_count,
            spray_half_angle_deg,
            discharge_coefficient,
            pressure_drop_pa,
        }) => {
            if *slot_count == 0 {
                issues.push("injector.slot_count must be at least 1".to_string());
            }
            range(
                issues,
                "injector.spray_half_angle_deg",
                *spray_half_angle_deg,
                5.0,
                80.0,
            );
            range(
                issues,
                "injector.discharge_coefficient",
                *discharge_coefficient,
                0.1,
                1.0,
            );
            if let Some(drop) = pressure_drop_pa {
                range(issues, "injector.pressure_drop_pa", *drop, 1.0e3, 1.0e7);
            }
        }
    }
}

fn check_combustion(mode: &CombustionMode, issues: &mut Vec<String>) {
    match mode {
        CombustionMode::InfiniteArea => {}
        CombustionMode::FiniteArea(FiniteAreaSpec::ContractionRatio(ratio)) => {
            if *ratio <= 1.0 {
                issues.push(format!(
                    "combustion.contraction_ratio ({ratio}) must exceed 1"
                ));
            } else {
                range(issues, "combustion.contraction_ratio", *ratio, 1.0, 50.0);
            }
        }
        CombustionMode::FiniteArea(FiniteAreaSpec::MassFlux(flux)) => {
            range(
                issues,
                "combustion.chamber_mass_flux_kg_m2_s",
                *flux,
                1.0,
                1.0e5,
            );
        }
    }
}

fn range(issues: &mut Vec<String>, field: &str, value: f64, lo: f64, hi: f64) {
    if !value.is_finite() || value < lo || value > hi {
        issues.push(format!("{field} must be within [{lo}, {hi}] (got {value})"));
    }
}
