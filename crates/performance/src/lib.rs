//! Steady-state combustion and nozzle performance for hybrid and solid motors.

use thiserror::Error;

pub mod gas;
pub mod grain;
pub mod solver;

pub use grain::{GrainGeometry, GrainSizing};
pub use solver::{MotorPerformance, SolverState, size, solve, solve_at_geometry};

/// Relative convergence tolerance shared by every iterative loop in this crate.
pub const RELATIVE_TOLERANCE: f64 = 1.0e-6;

/// Iteration cap shared by every iterative loop in this crate.
pub const MAX_ITERATIONS: usize = 1000;

/// Errors raised by the steady-state solver.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(
        "chamber pressure iteration did not converge after {iterations} iterations \
         (last pressure {last_pressure_pa:.1} Pa, residual {residual:.3e})"
    )]
    Convergence {
        iterations: usize,
        last_pressure_pa: f64,
        residual: f64,
    },
    #[error("infeasible design: {0}")]
    Infeasible(String),
}
