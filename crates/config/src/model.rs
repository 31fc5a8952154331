//! Raw motor request records as parsed from configuration files.
//!
//! Every field that has a workable engineering default is optional here;
//! [`crate::validate::validate`] fills defaults and produces the immutable
//! [`crate::MotorConfiguration`] used by the solver crates.

use std::fmt;

use serde::Deserialize;

/// Motor class selector.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MotorClass {
    Hybrid,
    Solid,
}

impl fmt::Display for MotorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorClass::Hybrid => write!(f, "hybrid"),
            MotorClass::Solid => write!(f, "solid"),
        }
    }
}

/// A motor design request parsed from a catalog or single-motor file.
#[derive(Debug, Deserialize, Clone)]
pub struct MotorRequest {
    pub name: String,
    pub class: MotorClass,
    pub thrust_n: f64,
    pub burn_time_s: f64,
    pub of_ratio: f64,
    pub chamber_pressure_pa: f64,
    #[serde(default)]
    pub tank_pressure_pa: Option<f64>,
    #[serde(default)]
    pub gas: Option<GasRequest>,
    #[serde(default)]
    pub nozzle: Option<NozzleRequest>,
    #[serde(default)]
    pub grain: Option<GrainRequest>,
    #[serde(default)]
    pub regression: Option<RegressionRequest>,
    #[serde(default)]
    pub fuel: Option<FuelRequest>,
    #[serde(default)]
    pub oxidizer: Option<OxidizerRequest>,
    #[serde(default)]
    pub injector: Option<InjectorRequest>,
    #[serde(default)]
    pub chamber: Option<ChamberRequest>,
    #[serde(default)]
    pub environment: Option<EnvironmentRequest>,
    #[serde(default)]
    pub combustion: Option<CombustionRequest>,
}

/// Combustion gas properties of the equilibrium chamber mixture.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GasRequest {
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub gas_constant_j_kg_k: Option<f64>,
    #[serde(default)]
    pub chamber_temperature_k: Option<f64>,
}

/// Nozzle contour family and expansion settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NozzleRequest {
    #[serde(default)]
    pub family: Option<String>,
    /// Omit (or set to zero) to size the nozzle for ambient exit pressure.
    #[serde(default)]
    pub expansion_ratio: Option<f64>,
    #[serde(default)]
    pub efficiency: Option<f64>,
}

/// Grain geometry bounds and sizing targets.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GrainRequest {
    #[serde(default)]
    pub port_diameter_m: Option<f64>,
    #[serde(default)]
    pub outer_diameter_m: Option<f64>,
    #[serde(default)]
    pub length_m: Option<f64>,
    #[serde(default)]
    pub target_oxidizer_flux_kg_m2_s: Option<f64>,
}

/// Regression-law coefficients `r = a * x^n`.
///
/// For hybrids `x` is oxidizer mass flux (kg/m²/s); for solids `x` is
/// chamber pressure (Pa).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RegressionRequest {
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub n: Option<f64>,
}

/// Fuel (or solid propellant) selection.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FuelRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
}

/// Oxidizer selection and feed properties.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct OxidizerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    #[serde(default)]
    pub viscosity_pa_s: Option<f64>,
    #[serde(default)]
    pub vapor_pressure_pa: Option<f64>,
}

/// Injector family selection with family-specific parameters.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InjectorRequest {
    #[serde(rename = "showerhead")]
    Showerhead {
        #[serde(default)]
        target_velocity_m_s: Option<f64>,
        #[serde(default)]
        discharge_coefficient: Option<f64>,
        #[serde(default)]
        min_hole_diameter_m: Option<f64>,
        #[serde(default)]
        max_hole_diameter_m: Option<f64>,
        #[serde(default)]
        plate_thickness_m: Option<f64>,
        #[serde(default)]
        hole_count: Option<usize>,
    },
    #[serde(rename = "pintle")]
    Pintle {
        pintle_diameter_m: f64,
        #[serde(default)]
        discharge_coefficient: Option<f64>,
        #[serde(default)]
        pressure_drop_pa: Option<f64>,
    },
    #[serde(rename = "swirl")]
    Swirl {
        #[serde(default)]
        slot_count: Option<usize>,
        #[serde(default)]
        spray_half_angle_deg: Option<f64>,
        #[serde(default)]
        discharge_coefficient: Option<f64>,
        #[serde(default)]
        pressure_drop_pa: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

/// Chamber envelope settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChamberRequest {
    #[serde(default)]
    pub characteristic_length_m: Option<f64>,
    #[serde(default)]
    pub diameter_m: Option<f64>,
}

/// Ambient operating conditions.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EnvironmentRequest {
    #[serde(default)]
    pub atmospheric_pressure_pa: Option<f64>,
    #[serde(default)]
    pub initial_temperature_k: Option<f64>,
}

/// Finite-area combustion request. Presence of this table enables the mode;
/// exactly one of the two fields must be supplied.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CombustionRequest {
    #[serde(default)]
    pub contraction_ratio: Option<f64>,
    #[serde(default)]
    pub chamber_mass_flux_kg_m2_s: Option<f64>,
}
