//! Rocket motor design calculator.
//!
//! Facade over the workspace crates: configuration and validation, the
//! steady-state performance solver, injector sizing, grain regression
//! simulation, Monte Carlo uncertainty propagation, and artifact export.
//! Keeping the physics in library crates lets multiple front-ends (CLI,
//! future GUI or web) share it.

pub use motor_config as config;
pub use motor_core::{constants, geometry, units};
pub use motor_export as export;
pub use motor_injector as injector;
pub use motor_montecarlo as montecarlo;
pub use motor_performance as performance;
pub use motor_regression as regression;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
