#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astro::standard_gravitational_parameter;
use crate::constants::{KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, MU_EARTH, SINGULARITY_TOLERANCE};
use crate::{Error, Num, Result};

/// Everything a conversion needs besides the orbit itself: the standard
/// gravitational parameter of the central body and the numeric tolerances.
///
/// A `Config` is a plain value. Build it once and share it between
/// threads freely.
///
/// ```
/// use keplerian_transform::Config;
///
/// let config = Config::new(3.986004418e14)
///     .unwrap()
///     .with_max_iterations(50);
///
/// assert_eq!(config.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Standard gravitational parameter (m^3 s^-2)
    pub mu: Num,
    /// Kepler solver stops once a Newton step is at most this large (rad)
    pub kepler_tolerance: Num,
    /// Kepler solver gives up after this many Newton steps
    pub max_iterations: usize,
    /// Eccentricity or sin(inclination) below this is treated as zero
    pub singularity_tolerance: Num,
}

impl Default for Config {
    fn default() -> Self {
        Self::earth()
    }
}

impl Config {
    pub fn new(mu: Num) -> Result<Self> {
        let config = Self {
            mu,
            ..Self::earth()
        };
        config.validate()?;

        Ok(config)
    }

    /// Config for a central body of the given mass (kg)
    pub fn from_central_mass(mass: Num) -> Result<Self> {
        Self::new(standard_gravitational_parameter(mass))
    }

    pub fn earth() -> Self {
        Self {
            mu: MU_EARTH,
            kepler_tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
            singularity_tolerance: SINGULARITY_TOLERANCE,
        }
    }

    pub fn with_kepler_tolerance(self, kepler_tolerance: Num) -> Self {
        Self {
            kepler_tolerance,
            ..self
        }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    pub fn with_singularity_tolerance(self, singularity_tolerance: Num) -> Self {
        Self {
            singularity_tolerance,
            ..self
        }
    }

    /// Checks every field, conversions call this before touching any input.
    pub fn validate(&self) -> Result<()> {
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(Error::invalid("mu", self.mu));
        }

        if !(self.kepler_tolerance.is_finite() && self.kepler_tolerance > 0.0) {
            return Err(Error::invalid("kepler_tolerance", self.kepler_tolerance));
        }

        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", 0.0));
        }

        if !(self.singularity_tolerance.is_finite() && self.singularity_tolerance >= 0.0) {
            return Err(Error::invalid(
                "singularity_tolerance",
                self.singularity_tolerance,
            ));
        }

        Ok(())
    }
}
