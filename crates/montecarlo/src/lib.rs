//! Monte Carlo uncertainty propagation over the steady-state solver.
//!
//! Each sample perturbs the nominal configuration with independent normal
//! relative perturbations, re-validates it, and solves it. Samples that fail
//! validation or the solver count against the success rate but contribute
//! nothing to the output statistics. Evaluation is embarrassingly parallel:
//! workers fold into local populations that merge associatively at the end,
//! so no shared counter is ever read-modify-written.

use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};

use motor_config::MotorConfiguration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Default number of samples.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Inclusive bounds on the requested sample count.
pub const MIN_SAMPLE_COUNT: usize = 10;
pub const MAX_SAMPLE_COUNT: usize = 10_000_000;

/// Perturbed values are clamped to at least this fraction of nominal so a
/// wide spread cannot flip the sign of a physical quantity.
pub const NOMINAL_CLAMP_FRACTION: f64 = 0.5;

/// Configuration quantities the engine knows how to perturb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Thrust,
    BurnTime,
    OfRatio,
    ChamberPressure,
    TankPressure,
    ChamberTemperature,
    RegressionA,
    RegressionN,
    FuelDensity,
    OxidizerDensity,
}

impl Parameter {
    /// Every perturbable parameter, in declaration order.
    pub const ALL: [Parameter; 10] = [
        Parameter::Thrust,
        Parameter::BurnTime,
        Parameter::OfRatio,
        Parameter::ChamberPressure,
        Parameter::TankPressure,
        Parameter::ChamberTemperature,
        Parameter::RegressionA,
        Parameter::RegressionN,
        Parameter::FuelDensity,
        Parameter::OxidizerDensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Thrust => "thrust_n",
            Parameter::BurnTime => "burn_time_s",
            Parameter::OfRatio => "of_ratio",
            Parameter::ChamberPressure => "chamber_pressure_pa",
            Parameter::TankPressure => "tank_pressure_pa",
            Parameter::ChamberTemperature => "gas.chamber_temperature_k",
            Parameter::RegressionA => "regression.a",
            Parameter::RegressionN => "regression.n",
            Parameter::FuelDensity => "fuel.density_kg_m3",
            Parameter::OxidizerDensity => "oxidizer.density_kg_m3",
        }
    }

    pub fn from_name(name: &str) -> Option<Parameter> {
        Parameter::ALL
            .into_iter()
            .find(|parameter| parameter.name() == name)
    }

    /// Scale the parameter's nominal value by `factor`.
    fn apply(self, config: &mut MotorConfiguration, factor: f64) {
        match self {
            Parameter::Thrust => config.thrust_n *= factor,
            Parameter::BurnTime => config.burn_time_s *= factor,
            Parameter::OfRatio => config.of_ratio *= factor,
            Parameter::ChamberPressure => config.chamber_pressure_pa *= factor,
            Parameter::TankPressure => {
                if let Some(tank) = config.tank_pressure_pa.as_mut() {
                    *tank *= factor;
                }
            }
            Parameter::ChamberTemperature => config.gas.chamber_temperature_k *= factor,
            Parameter::RegressionA => config.regression.a *= factor,
            Parameter::RegressionN => config.regression.n *= factor,
            Parameter::FuelDensity => config.fuel.density_kg_m3 *= factor,
            Parameter::OxidizerDensity => config.oxidizer.density_kg_m3 *= factor,
        }
    }
}

/// Declared input uncertainty: relative 1-sigma spread per parameter.
#[derive(Debug, Clone, Default)]
pub struct UncertaintySpec {
    entries: Vec<(Parameter, f64)>,
}

impl UncertaintySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same relative spread on every perturbable parameter.
    pub fn uniform(relative_sigma: f64) -> Result<Self, MonteCarloError> {
        let mut spec = Self::new();
        for parameter in Parameter::ALL {
            spec.set_parameter(parameter, relative_sigma)?;
        }
        Ok(spec)
    }

    /// Declare a spread for a parameter by name. Replaces a prior entry for
    /// the same parameter.
    pub fn set(&mut self, name: &str, relative_sigma: f64) -> Result<(), MonteCarloError> {
        let parameter = Parameter::from_name(name)
            .ok_or_else(|| MonteCarloError::UnknownParameter(name.to_string()))?;
        self.set_parameter(parameter, relative_sigma)
    }

    pub fn set_parameter(
        &mut self,
        parameter: Parameter,
        relative_sigma: f64,
    ) -> Result<(), MonteCarloError> {
        if !relative_sigma.is_finite() || relative_sigma <= 0.0 {
            return Err(MonteCarloError::InvalidSigma {
                name: parameter.name(),
                sigma: relative_sigma,
            });
        }
        self.entries.retain(|(existing, _)| *existing != parameter);
        self.entries.push((parameter, relative_sigma));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Parameter, f64)] {
        &self.entries
    }
}

/// Errors raised by the Monte Carlo engine.
#[derive(Debug, Error)]
pub enum MonteCarloError {
    #[error("unknown uncertain parameter `{0}`")]
    UnknownParameter(String),
    #[error("relative sigma {sigma} for `{name}` must be positive and finite")]
    InvalidSigma { name: &'static str, sigma: f64 },
    #[error(
        "sample count {0} is outside the supported {MIN_SAMPLE_COUNT}-{MAX_SAMPLE_COUNT} range"
    )]
    InvalidSampleCount(usize),
    #[error("the run was stopped before any sample completed")]
    NoSamples,
}

/// Distribution statistics of one tracked output quantity.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuantityStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub percentile_5: f64,
    pub percentile_95: f64,
}

/// Aggregated outcome of a Monte Carlo run.
///
/// Statistics cover the successful samples only; `success_rate` is taken
/// over every completed sample, failures included.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticalSummary {
    pub requested_samples: usize,
    /// Samples evaluated before a cooperative stop (equals
    /// `requested_samples` for an uninterrupted run).
    pub completed_samples: usize,
    pub successful_samples: usize,
    pub success_rate: f64,
    pub thrust_n: QuantityStatistics,
    pub specific_impulse_s: QuantityStatistics,
    pub chamber_pressure_pa: QuantityStatistics,
    pub total_mass_flow_kg_s: QuantityStatistics,
}

/// Worker-local sample population. Populations merge by concatenation, so
/// the reduction is associative and order-independent for the statistics.
#[derive(Debug, Default)]
struct Population {
    completed: usize,
    thrust_n: Vec<f64>,
    specific_impulse_s: Vec<f64>,
    chamber_pressure_pa: Vec<f64>,
    total_mass_flow_kg_s: Vec<f64>,
}

impl Population {
    fn merge(mut self, mut other: Population) -> Population {
        self.completed += other.completed;
        self.thrust_n.append(&mut other.thrust_n);
        self.specific_impulse_s.append(&mut other.specific_impulse_s);
        self.chamber_pressure_pa.append(&mut other.chamber_pressure_pa);
        self.total_mass_flow_kg_s.append(&mut other.total_mass_flow_kg_s);
        self
    }
}

/// Run with a seed drawn from the thread-local generator.
pub fn run_monte_carlo(
    config: &MotorConfiguration,
    spec: &UncertaintySpec,
    sample_count: usize,
) -> Result<StatisticalSummary, MonteCarloError> {
    run_monte_carlo_seeded(config, spec, sample_count, rand::rng().random())
}

/// Deterministic run: the same seed reproduces the same summary regardless
/// of how rayon schedules the samples.
pub fn run_monte_carlo_seeded(
    config: &MotorConfiguration,
    spec: &UncertaintySpec,
    sample_count: usize,
    seed: u64,
) -> Result<StatisticalSummary, MonteCarloError> {
    let stop = AtomicBool::new(false);
    run_monte_carlo_with_stop(config, spec, sample_count, seed, &stop)
}

/// Deterministic run with a cooperative stop flag checked between samples.
/// Partial statistics over whatever samples completed remain valid.
pub fn run_monte_carlo_with_stop(
    config: &MotorConfiguration,
    spec: &UncertaintySpec,
    sample_count: usize,
    seed: u64,
    stop: &AtomicBool,
) -> Result<StatisticalSummary, MonteCarloError> {
    if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&sample_count) {
        return Err(MonteCarloError::InvalidSampleCount(sample_count));
    }

    let population = (0..sample_count)
        .into_par_iter()
        .fold(Population::default, |mut population, index| {
            if stop.load(Ordering::Relaxed) {
                return population;
            }
            population.completed += 1;
            // Per-sample generator keyed off the index keeps the draw
            // independent of worker scheduling.
            let mut rng = StdRng::seed_from_u64(
                seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            );
            if let Some(performance) = evaluate(config, spec, &mut rng) {
                population.thrust_n.push(performance.thrust_n);
                population
                    .specific_impulse_s
                    .push(performance.specific_impulse_s);
                population
                    .chamber_pressure_pa
                    .push(performance.chamber_pressure_pa);
                population
                    .total_mass_flow_kg_s
                    .push(performance.total_mass_flow_kg_s);
            }
            population
        })
        .reduce(Population::default, Population::merge);

    if population.completed == 0 {
        return Err(MonteCarloError::NoSamples);
    }

    let successful = population.thrust_n.len();
    Ok(StatisticalSummary {
        requested_samples: sample_count,
        completed_samples: population.completed,
        successful_samples: successful,
        success_rate: successful as f64 / population.completed as f64,
        thrust_n: summarize(population.thrust_n),
        specific_impulse_s: summarize(population.specific_impulse_s),
        chamber_pressure_pa: summarize(population.chamber_pressure_pa),
        total_mass_flow_kg_s: summarize(population.total_mass_flow_kg_s),
    })
}

/// Perturb, re-validate, and solve one sample. `None` marks a failure.
fn evaluate(
    config: &MotorConfiguration,
    spec: &UncertaintySpec,
    rng: &mut StdRng,
) -> Option<motor_performance::MotorPerformance> {
    let mut sample = config.clone();
    for (parameter, sigma) in spec.entries() {
        let factor = (1.0 + sigma * standard_normal(rng)).max(NOMINAL_CLAMP_FRACTION);
        parameter.apply(&mut sample, factor);
    }
    motor_config::check(&sample).ok()?;
    motor_performance::solve(&sample).ok()
}

/// One standard-normal draw via the Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    (-2.0 * u1.max(f64::MIN_POSITIVE).ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn summarize(mut values: Vec<f64>) -> QuantityStatistics {
    if values.is_empty() {
        return QuantityStatistics {
            mean: f64::NAN,
            std_dev: f64::NAN,
            coefficient_of_variation: f64::NAN,
            percentile_5: f64::NAN,
            percentile_95: f64::NAN,
        };
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    QuantityStatistics {
        mean,
        std_dev,
        coefficient_of_variation: if mean.abs() > f64::EPSILON {
            std_dev / mean.abs()
        } else {
            f64::NAN
        },
        percentile_5: percentile(&values, 0.05),
        percentile_95: percentile(&values, 0.95),
    }
}

/// Percentile by sorted index, matching the population size exactly.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let index = ((sorted.len() as f64 * fraction) as usize).min(sorted.len() - 1);
    sorted[index]
}
