use crate::Num;

/// Gravitational constant
pub const G: Num = 6.67430e-11;

pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// Standard gravitational parameter of the Earth (m^3 s^-2)
pub const MU_EARTH: Num = 3.986004418e14;

/// Standard gravitational parameter of the Sun (m^3 s^-2)
pub const MU_SUN: Num = 1.32712440018e20;

/// Absolute step size (radians) at which the Kepler solver stops iterating
pub const KEPLER_TOLERANCE: Num = 1e-12;

/// Newton steps allowed before the Kepler solver gives up
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Below this, eccentricity and sin(inclination) are treated as zero
pub const SINGULARITY_TOLERANCE: Num = 1e-6;
