//! Ideal-gas and isentropic nozzle relations for a calorically perfect
//! combustion mixture.

use motor_core::constants::{REFERENCE_TEMPERATURE_K, TEMPERATURE_SENSITIVITY_PER_K};

use crate::{MAX_ITERATIONS, RELATIVE_TOLERANCE};

/// Vandenkerckhove function of the specific heat ratio.
#[inline]
pub fn vandenkerckhove(gamma: f64) -> f64 {
    gamma.sqrt() * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (2.0 * (gamma - 1.0)))
}

/// Ideal characteristic velocity c* (m/s).
#[inline]
pub fn characteristic_velocity(gamma: f64, gas_constant: f64, chamber_temperature: f64) -> f64 {
    (gas_constant * chamber_temperature).sqrt() / vandenkerckhove(gamma)
}

/// Choked mass flow through the throat (kg/s).
#[inline]
pub fn throat_mass_flow(chamber_pressure: f64, throat_area: f64, c_star: f64) -> f64 {
    chamber_pressure * throat_area / c_star
}

/// Isentropic area ratio A/A* at the given Mach number.
pub fn area_ratio(mach: f64, gamma: f64) -> f64 {
    let term = (2.0 / (gamma + 1.0)) * (1.0 + 0.5 * (gamma - 1.0) * mach * mach);
    term.powf((gamma + 1.0) / (2.0 * (gamma - 1.0))) / mach
}

/// Static-to-stagnation pressure ratio at the given Mach number.
pub fn pressure_ratio(mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * mach * mach).powf(-gamma / (gamma - 1.0))
}

/// Pressure ratio at which the flow chokes (exit pressure over chamber
/// pressure at Mach 1).
pub fn critical_pressure_ratio(gamma: f64) -> f64 {
    (2.0 / (gamma + 1.0)).powf(gamma / (gamma - 1.0))
}

/// Supersonic exit Mach number for an expansion ratio, isolated by bisection.
///
/// The area ratio is strictly increasing on the supersonic branch, so the
/// bracket [1, 100] always contains the root. Callers guarantee
/// `expansion_ratio >= 1`.
pub fn exit_mach(expansion_ratio: f64, gamma: f64) -> f64 {
    bisect(1.0 + 1.0e-9, 100.0, |mach| {
        area_ratio(mach, gamma) - expansion_ratio
    })
}

/// Subsonic chamber Mach number for a contraction ratio Ac/At.
///
/// Uses the subsonic branch of the area ratio, which is strictly decreasing
/// towards Mach 1. Callers guarantee `contraction_ratio > 1`.
pub fn chamber_mach(contraction_ratio: f64, gamma: f64) -> f64 {
    bisect(1.0e-6, 1.0, |mach| {
        contraction_ratio - area_ratio(mach, gamma)
    })
}

/// Ideal thrust coefficient including the pressure-differential term.
pub fn thrust_coefficient(
    gamma: f64,
    exit_pressure: f64,
    chamber_pressure: f64,
    ambient_pressure: f64,
    expansion_ratio: f64,
) -> f64 {
    let pr = exit_pressure / chamber_pressure;
    let momentum = (2.0 * gamma * gamma / (gamma - 1.0))
        * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (gamma - 1.0))
        * (1.0 - pr.powf((gamma - 1.0) / gamma));
    momentum.max(0.0).sqrt()
        + expansion_ratio * (exit_pressure - ambient_pressure) / chamber_pressure
}

/// Exit velocity for a given chamber state and pressure ratio (m/s).
pub fn exit_velocity(
    gamma: f64,
    gas_constant: f64,
    chamber_temperature: f64,
    pressure_ratio: f64,
) -> f64 {
    let term = 2.0 * gamma / (gamma - 1.0)
        * gas_constant
        * chamber_temperature
        * (1.0 - pressure_ratio.powf((gamma - 1.0) / gamma));
    term.max(0.0).sqrt()
}

/// Linear burn-rate correction for propellant soak temperature.
#[inline]
pub fn temperature_correction(initial_temperature: f64) -> f64 {
    1.0 + TEMPERATURE_SENSITIVITY_PER_K * (initial_temperature - REFERENCE_TEMPERATURE_K)
}

/// Stagnation pressure recovered at the nozzle entrance for a chamber flowing
/// at the given Mach number. Approaches 1 as the chamber Mach number goes
/// to zero (the infinite-area limit).
pub fn finite_area_pressure_factor(chamber_mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * chamber_mach * chamber_mach).powf(gamma / (gamma - 1.0))
        / (1.0 + gamma * chamber_mach * chamber_mach)
}

/// Bisection on a function arranged to be increasing across the bracket.
pub(crate) fn bisect<F: Fn(f64) -> f64>(mut lo: f64, mut hi: f64, f: F) -> f64 {
    let mut mid = 0.5 * (lo + hi);
    for _ in 0..MAX_ITERATIONS {
        mid = 0.5 * (lo + hi);
        if (hi - lo) / mid.abs().max(f64::MIN_POSITIVE) < RELATIVE_TOLERANCE {
            break;
        }
        if f(mid) > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    mid
}
