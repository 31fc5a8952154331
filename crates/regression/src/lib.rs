//! Time-stepped grain regression under the quasi-steady assumption.
//!
//! Each step re-solves the steady-state equilibrium at the current port
//! diameter, records a timeline sample, and advances the port by the
//! converged regression rate. The sample count is fixed up front: once the
//! web is consumed (or a late step stops converging) the remaining samples
//! are frozen at the last state with an explanatory status.

use std::fmt;

use motor_config::MotorConfiguration;
use motor_performance::SolverError;
use serde::Serialize;
use thiserror::Error;

/// Default number of timeline samples.
pub const DEFAULT_STEP_COUNT: usize = 80;

/// Inclusive bounds on the requested step count.
pub const MIN_STEP_COUNT: usize = 2;
pub const MAX_STEP_COUNT: usize = 10_000;

/// Port fraction of the grain outer diameter treated as burnthrough.
pub const BURNTHROUGH_PORT_FRACTION: f64 = 0.95;

/// Quasi-steady motor state at one timeline instant.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSample {
    pub time_s: f64,
    pub port_diameter_m: f64,
    pub of_ratio: f64,
    pub chamber_pressure_pa: f64,
    pub thrust_n: f64,
    pub status: SampleStatus,
}

/// Health of a timeline sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    Nominal,
    BurnthroughRisk,
    SolverStalled,
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStatus::Nominal => write!(f, "nominal"),
            SampleStatus::BurnthroughRisk => write!(f, "burnthrough_risk"),
            SampleStatus::SolverStalled => write!(f, "solver_stalled"),
        }
    }
}

/// Complete regression timeline over the configured burn.
#[derive(Debug, Clone)]
pub struct RegressionTimeline {
    /// Uniformly spaced samples starting at ignition.
    pub samples: Vec<TimelineSample>,
    pub step_seconds: f64,
    /// The port reached the burnthrough fraction before the end of the burn.
    pub burnthrough: bool,
    /// A late step stopped converging and the timeline was frozen there.
    pub stalled: bool,
}

/// Errors raised by the regression simulator.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("step count {0} is outside the supported {MIN_STEP_COUNT}-{MAX_STEP_COUNT} range")]
    InvalidStepCount(usize),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Simulate the burn with the given number of uniform time steps.
///
/// A solver failure on the very first step propagates as an error; failures
/// after ignition freeze the timeline instead, mirroring how burnthrough is
/// reported.
pub fn simulate(
    config: &MotorConfiguration,
    step_count: usize,
) -> Result<RegressionTimeline, RegressionError> {
    if !(MIN_STEP_COUNT..=MAX_STEP_COUNT).contains(&step_count) {
        return Err(RegressionError::InvalidStepCount(step_count));
    }

    let sizing = motor_performance::size(config)?;
    let mut grain = sizing.geometry.clone();
    let step_seconds = config.burn_time_s / step_count as f64;
    let burnthrough_port = BURNTHROUGH_PORT_FRACTION * grain.outer_diameter_m;

    let mut samples: Vec<TimelineSample> = Vec::with_capacity(step_count);
    let mut burnthrough = false;
    let mut stalled = false;

    for index in 0..step_count {
        if grain.port_diameter_m >= burnthrough_port {
            burnthrough = true;
            freeze(
                &mut samples,
                step_count,
                step_seconds,
                grain.port_diameter_m,
                SampleStatus::BurnthroughRisk,
            );
            break;
        }

        let performance = match motor_performance::solve_at_geometry(config, &grain) {
            Ok(performance) => performance,
            Err(error) => {
                if samples.is_empty() {
                    return Err(error.into());
                }
                stalled = true;
                freeze(
                    &mut samples,
                    step_count,
                    step_seconds,
                    grain.port_diameter_m,
                    SampleStatus::SolverStalled,
                );
                break;
            }
        };

        samples.push(TimelineSample {
            time_s: index as f64 * step_seconds,
            port_diameter_m: grain.port_diameter_m,
            of_ratio: performance.oxidizer_mass_flow_kg_s / performance.fuel_mass_flow_kg_s,
            chamber_pressure_pa: performance.chamber_pressure_pa,
            thrust_n: performance.thrust_n,
            status: SampleStatus::Nominal,
        });
        grain.port_diameter_m += 2.0 * performance.regression_rate_m_s * step_seconds;
    }

    Ok(RegressionTimeline {
        samples,
        step_seconds,
        burnthrough,
        stalled,
    })
}

/// Fill the remaining samples with the last known state and a status
/// explaining why the timeline stopped evolving.
fn freeze(
    samples: &mut Vec<TimelineSample>,
    step_count: usize,
    step_seconds: f64,
    port_diameter_m: f64,
    status: SampleStatus,
) {
    let (of_ratio, chamber_pressure_pa, thrust_n) = samples
        .last()
        .map(|sample| (sample.of_ratio, sample.chamber_pressure_pa, sample.thrust_n))
        .unwrap_or((0.0, 0.0, 0.0));
    while samples.len() < step_count {
        samples.push(TimelineSample {
            time_s: samples.len() as f64 * step_seconds,
            port_diameter_m,
            of_ratio,
            chamber_pressure_pa,
            thrust_n,
            status,
        });
    }
}
