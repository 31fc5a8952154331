//! Core units, constants, and shared primitives for the Motor Design Calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Standard sea-level atmospheric pressure (Pa).
    pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
    /// Reference propellant soak temperature for burn-rate data (K).
    pub const REFERENCE_TEMPERATURE_K: f64 = 298.15;
    /// Linear burn-rate temperature sensitivity (1/K).
    pub const TEMPERATURE_SENSITIVITY_PER_K: f64 = 0.0015;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert pascals to bar.
    #[inline]
    pub fn pa_to_bar(v: f64) -> f64 {
        v / 100_000.0
    }

    /// Convert metres to millimetres.
    #[inline]
    pub fn m_to_mm(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v * std::f64::consts::PI / 180.0
    }
}

/// Circular and annular geometry helpers shared across crates.
pub mod geometry {
    use std::f64::consts::PI;

    /// Cross-sectional area of a circle from its diameter.
    #[inline]
    pub fn circle_area(diameter: f64) -> f64 {
        PI * diameter * diameter / 4.0
    }

    /// Diameter of a circle from its cross-sectional area.
    #[inline]
    pub fn diameter_from_area(area: f64) -> f64 {
        (4.0 * area / PI).sqrt()
    }

    /// Lateral (burning) surface area of a cylindrical port.
    #[inline]
    pub fn cylinder_lateral_area(diameter: f64, length: f64) -> f64 {
        PI * diameter * length
    }

    /// Volume of a cylinder from its diameter and length.
    #[inline]
    pub fn cylinder_volume(diameter: f64, length: f64) -> f64 {
        circle_area(diameter) * length
    }
}
