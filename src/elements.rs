#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astro::elliptic::{self, estimate_anomaly};
use crate::astro::{mean_motion, period, specific_angular_momentum};
use crate::math::{normalize_angle, wrap_angle_diff};
use crate::{vec3, Config, Error, Mat3, Num, Result, StateVectors, Vec3};

/// Classical orbital elements of an elliptic orbit, SI units.
///
/// Angles returned by [`StateVectors::to_elements`] lie in (-π, π],
/// use [`KeplerianElements::normalized`] to move them into [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerianElements {
    /// a (m)
    pub semi_major_axis: Num,
    /// e, elliptic orbits only: [0, 1)
    pub eccentricity: Num,
    /// i (rad)
    pub inclination: Num,
    /// Ω (rad)
    pub longitude_of_ascending_node: Num,
    /// ω (rad)
    pub argument_of_periapsis: Num,
    /// M (rad)
    pub mean_anomaly: Num,
}

impl KeplerianElements {
    pub fn new(
        semi_major_axis: Num,
        eccentricity: Num,
        inclination: Num,
        longitude_of_ascending_node: Num,
        argument_of_periapsis: Num,
        mean_anomaly: Num,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            longitude_of_ascending_node,
            argument_of_periapsis,
            mean_anomaly,
        }
    }

    /// Sum of absolute differences of the eccentricity and the angles, with
    /// angle differences taken modulo 2π.
    pub fn angle_abs_diff(&self, other: &Self) -> Num {
        let mut diff = 0.0;

        diff += (self.eccentricity - other.eccentricity).abs();
        diff += (self.inclination - other.inclination).abs();
        diff += wrap_angle_diff(
            self.longitude_of_ascending_node,
            other.longitude_of_ascending_node,
        )
        .abs();
        diff += wrap_angle_diff(self.argument_of_periapsis, other.argument_of_periapsis).abs();
        diff += wrap_angle_diff(self.mean_anomaly, other.mean_anomaly).abs();

        diff
    }

    /// Same orbit with Ω, ω and M mapped into [0, 2π)
    pub fn normalized(&self) -> Self {
        Self {
            longitude_of_ascending_node: normalize_angle(self.longitude_of_ascending_node),
            argument_of_periapsis: normalize_angle(self.argument_of_periapsis),
            mean_anomaly: normalize_angle(self.mean_anomaly),
            ..*self
        }
    }

    pub fn from_state_vectors(state_vectors: &StateVectors, config: &Config) -> Result<Self> {
        state_vectors.to_elements(config)
    }

    /// https://en.wikipedia.org/wiki/Orbital_period
    pub fn period(&self, mu: Num) -> Num {
        period(self.semi_major_axis, mu)
    }

    /// https://en.wikipedia.org/wiki/Mean_motion
    pub fn mean_motion(&self, mu: Num) -> Num {
        mean_motion(self.semi_major_axis, mu)
    }

    pub fn specific_angular_momentum(&self, mu: Num) -> Num {
        specific_angular_momentum(self.semi_major_axis, self.eccentricity, mu)
    }

    pub fn periapsis_radius(&self) -> Num {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_radius(&self) -> Num {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// True anomaly at the mean anomaly of these elements
    pub fn true_anomaly(&self) -> Result<Num> {
        let E = elliptic::solve_kepler(self.mean_anomaly, self.eccentricity)?;

        Ok(elliptic::true_anomaly(E, self.eccentricity))
    }

    /// Unit normal of the orbital plane
    pub fn normal(&self) -> Vec3 {
        self.perifocal_to_inertial(Vec3::Z)
    }

    /// Convenience wrapper around [`Self::to_state_vectors`] with default
    /// tolerances.
    pub fn state_vectors(&self, mu: Num) -> Result<StateVectors> {
        self.to_state_vectors(&Config::new(mu)?)
    }

    /// Position and velocity at the instant described by the mean anomaly.
    ///
    /// ```
    /// use keplerian_transform::{Config, KeplerianElements};
    ///
    /// let iss = KeplerianElements::new(6_778_000.0, 0.01, 0.9006, 0.0, 0.0, 0.0);
    /// let sv = iss.to_state_vectors(&Config::earth()).unwrap();
    ///
    /// // M = 0 puts the station at periapsis
    /// assert!((sv.position.length() - 6_710_220.0).abs() < 1e-3);
    /// ```
    pub fn to_state_vectors(&self, config: &Config) -> Result<StateVectors> {
        config.validate()?;
        self.validate()?;

        tracing::debug!(elements = ?self, mu = config.mu, "converting elements to state vectors");

        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let μ = config.mu;

        let E = estimate_anomaly(
            self.mean_anomaly,
            e,
            config.kepler_tolerance,
            config.max_iterations,
        )?;
        let (sin_E, cos_E) = E.sin_cos();

        let r = a * (1.0 - e * cos_E);

        // Perifocal x and y
        let x = a * (cos_E - e);
        let y = a * (1.0 - e.powi(2)).sqrt() * sin_E;

        // Perifocal velocity
        let k = (μ / (a * (1.0 - e.powi(2)))).sqrt();
        let vx = -k * y / r;
        let vy = k * (e + x / r);

        // Time-invariant rotation, velocity transforms like position
        let m = self.perifocal_to_inertial_matrix();

        let state_vectors = StateVectors {
            position: m.mul_vec3(vec3(x, y, 0.0)),
            velocity: m.mul_vec3(vec3(vx, vy, 0.0)),
        };

        tracing::debug!(?state_vectors, eccentric_anomaly = E, "state vectors computed");

        Ok(state_vectors)
    }

    #[inline(always)]
    pub fn perifocal_to_inertial(&self, perifocal: Vec3) -> Vec3 {
        self.perifocal_to_inertial_matrix().mul_vec3(perifocal)
    }

    /// Rz(Ω) * Rx(i) * Rz(ω)
    fn perifocal_to_inertial_matrix(&self) -> Mat3 {
        let mut m = Mat3::IDENTITY;

        let Ω = self.longitude_of_ascending_node;
        let i = self.inclination;
        let ω = self.argument_of_periapsis;

        m *= Mat3::from_rotation_z(Ω);
        m *= Mat3::from_rotation_x(i);
        m *= Mat3::from_rotation_z(ω);

        m
    }

    fn validate(&self) -> Result<()> {
        let a = self.semi_major_axis;
        if !(a.is_finite() && a > 0.0) {
            return Err(Error::invalid("semi_major_axis", a));
        }

        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(Error::invalid("eccentricity", self.eccentricity));
        }

        let angles = [
            ("inclination", self.inclination),
            ("longitude_of_ascending_node", self.longitude_of_ascending_node),
            ("argument_of_periapsis", self.argument_of_periapsis),
            ("mean_anomaly", self.mean_anomaly),
        ];

        for (parameter, value) in angles {
            if !value.is_finite() {
                return Err(Error::invalid(parameter, value));
            }
        }

        Ok(())
    }
}
