#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{vec3, Config, Degeneracy, Error, KeplerianElements, Num, Result, Vec3, PI, TWO_PI};

/// Position (m) and velocity (m/s) in an inertial frame centered on the
/// primary body.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl StateVectors {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    pub fn from_components(x: Num, y: Num, z: Num, vx: Num, vy: Num, vz: Num) -> Self {
        Self::new(vec3(x, y, z), vec3(vx, vy, vz))
    }

    pub fn abs_diff(&self, other: &Self) -> Num {
        self.position.distance(other.position) + self.velocity.distance(other.velocity)
    }

    pub fn radius(&self) -> Num {
        self.position.length()
    }

    pub fn speed(&self) -> Num {
        self.velocity.length()
    }

    /// h = r x v
    pub fn specific_angular_momentum(&self) -> Vec3 {
        self.position.cross(self.velocity)
    }

    /// v^2 / 2 - mu / r, negative for bound orbits
    pub fn specific_energy(&self, mu: Num) -> Num {
        self.velocity.length_squared() / 2.0 - mu / self.radius()
    }

    /// Convenience wrapper around [`Self::to_elements`] with default
    /// tolerances.
    pub fn elements(&self, mu: Num) -> Result<KeplerianElements> {
        self.to_elements(&Config::new(mu)?)
    }

    /// Classical elements of the orbit passing through this state.
    ///
    /// Ω, ω and M come out in (-π, π]. Circular, equatorial and
    /// rectilinear states have no classical elements and are rejected with
    /// [`Error::DegenerateGeometry`], unbound states (e >= 1) with
    /// [`Error::InvalidInput`].
    pub fn to_elements(&self, config: &Config) -> Result<KeplerianElements> {
        config.validate()?;
        self.validate()?;

        tracing::debug!(state_vectors = ?self, mu = config.mu, "converting state vectors to elements");

        let μ = config.mu;
        let tolerance = config.singularity_tolerance;

        let rv = self.position;
        let vv = self.velocity;
        let r = rv.length();
        let v = vv.length();

        // Vis-viva solved for the semi-major axis
        let inverse_a = 2.0 / r - v.powi(2) / μ;
        if inverse_a <= 0.0 {
            // Parabolic or hyperbolic
            return Err(Error::invalid("velocity", v));
        }
        let a = 1.0 / inverse_a;

        // Mean motion
        let n = (μ / a.powi(3)).sqrt();

        // Orbital angular momentum
        // This vector should point in the normal direction of the orbit
        let hv = rv.cross(vv);
        let h = hv.length();

        if h == 0.0 {
            return Err(reject(Degeneracy::Rectilinear));
        }

        // Rounding can push h^2 / (mu a) just past 1 for circular orbits
        let e = (1.0 - h.powi(2) / (μ * a)).max(0.0).sqrt();

        if e < tolerance {
            return Err(reject(Degeneracy::Circular));
        }

        // Nearly radial states round h^2 / (mu a) away and land on e = 1
        if e >= 1.0 - tolerance {
            return Err(reject(Degeneracy::Rectilinear));
        }

        // sin(i), zero for prograde and retrograde equatorial orbits alike
        if hv.x.hypot(hv.y) / h < tolerance {
            return Err(reject(Degeneracy::Equatorial));
        }

        // Eccentric anomaly
        let cos_E = (1.0 - r / a) / e;
        let sin_E = rv.dot(vv) / (a.powi(2) * n * e);
        let E = fold_negative_pi(sin_E.atan2(cos_E));

        // Mean anomaly
        let M = E - e * E.sin();

        // Inclination
        // Equation is i = arccos(hz / h)
        let i = (hv.z / h).clamp(-1.0, 1.0).acos();

        // Longitude of the ascending node, the node line is z x h
        let Ω = fold_negative_pi(hv.x.atan2(-hv.y));

        // Argument of periapsis from the z components of the perifocal basis
        // vectors P (towards periapsis) and Q (90° ahead in the orbit)
        let (sin_E, cos_E) = E.sin_cos();
        let z = rv.z;
        let vz = vv.z;
        let Pz = cos_E * z / r - sin_E * vz / (n * a);
        let Qz = (sin_E * z / r + (cos_E - e) * vz / (n * a)) / (1.0 - e.powi(2)).sqrt();
        let ω = fold_negative_pi(Pz.atan2(Qz));

        let elements = KeplerianElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: i,
            longitude_of_ascending_node: Ω,
            argument_of_periapsis: ω,
            mean_anomaly: M,
        };

        tracing::debug!(?elements, "elements computed");

        Ok(elements)
    }

    fn validate(&self) -> Result<()> {
        for (parameter, vector) in [("position", self.position), ("velocity", self.velocity)] {
            if !vector.is_finite() {
                return Err(Error::invalid(parameter, vector.length()));
            }
        }

        if self.position == Vec3::ZERO {
            return Err(Error::invalid("position", 0.0));
        }

        Ok(())
    }
}

/// atan2 gives -π for a signed-zero numerator, keep angles in (-π, π]
fn fold_negative_pi(angle: Num) -> Num {
    if angle <= -PI {
        angle + TWO_PI
    } else {
        angle
    }
}

fn reject(degeneracy: Degeneracy) -> Error {
    tracing::debug!(%degeneracy, "state vectors have no classical elements");

    degeneracy.into()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    use super::*;
    use crate::constants::{MU_EARTH, PI};
    use crate::math::wrap_angle_diff;

    const MU: Num = 3.986e14;

    fn assert_same_orbit(actual: &KeplerianElements, expected: &KeplerianElements) {
        assert_relative_eq!(
            actual.semi_major_axis,
            expected.semi_major_axis,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            actual.eccentricity,
            expected.eccentricity,
            max_relative = 1e-6
        );
        assert_relative_eq!(actual.inclination, expected.inclination, max_relative = 1e-6);

        let angles = [
            (
                "longitude of ascending node",
                actual.longitude_of_ascending_node,
                expected.longitude_of_ascending_node,
            ),
            (
                "argument of periapsis",
                actual.argument_of_periapsis,
                expected.argument_of_periapsis,
            ),
            ("mean anomaly", actual.mean_anomaly, expected.mean_anomaly),
        ];

        for (what, a, b) in angles {
            let diff = wrap_angle_diff(a, b).abs();
            assert!(diff < 1e-6, "{what}: {a} vs {b} differ by {diff}");
        }
    }

    #[test]
    fn round_trip_generic_orbit() {
        let elements = KeplerianElements::new(7_000_000.0, 0.1, 0.5, 1.0, 0.5, 1.0);

        let sv = elements.state_vectors(MU).unwrap();
        let recovered = sv.elements(MU).unwrap();

        assert_same_orbit(&recovered, &elements);
        assert!(elements.angle_abs_diff(&recovered) < 1e-9);
    }

    #[test_case(KeplerianElements::new(7_000_000.0, 0.1, 0.5, 4.0, 5.5, 4.0); "angles past pi")]
    #[test_case(KeplerianElements::new(26_600_000.0, 0.74, 1.1, 4.0, 4.7, 3.0); "molniya")]
    #[test_case(KeplerianElements::new(7_000_000.0, 0.3, 2.5, -2.0, 3.0, -3.0); "retrograde")]
    #[test_case(KeplerianElements::new(6_778_000.0, 0.01, 0.9006, 1e-4, 1e-4, 1e-4); "iss near nodes")]
    #[test_case(KeplerianElements::new(1.496e11, 0.0167, 0.4, 0.2, 1.8, 2.5); "large semi major axis")]
    fn round_trip(elements: KeplerianElements) {
        let config = Config::new(MU).unwrap();

        let sv = elements.to_state_vectors(&config).unwrap();
        let recovered = KeplerianElements::from_state_vectors(&sv, &config).unwrap();

        assert_same_orbit(&recovered, &elements);
    }

    #[test]
    fn angles_come_out_in_atan2_range() {
        let elements = KeplerianElements::new(7_000_000.0, 0.2, 1.0, 5.0, 4.0, 6.0);

        let recovered = elements.state_vectors(MU).unwrap().elements(MU).unwrap();

        for angle in [
            recovered.longitude_of_ascending_node,
            recovered.argument_of_periapsis,
            recovered.mean_anomaly,
        ] {
            assert!(angle > -PI && angle <= PI, "{angle} out of range");
        }

        assert_relative_eq!(
            recovered.normalized().longitude_of_ascending_node,
            5.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn signed_zero_node_folds_onto_pi() {
        // r x v has an x component of -0.0 here
        let sv = StateVectors::from_components(7_000_000.0, 0.0, 0.0, 100.0, 7_000.0, -3_000.0);
        assert!(sv.specific_angular_momentum().x.is_sign_negative());

        let elements = sv.elements(MU_EARTH).unwrap();

        assert_eq!(elements.longitude_of_ascending_node, PI);
        for angle in [
            elements.longitude_of_ascending_node,
            elements.argument_of_periapsis,
            elements.mean_anomaly,
        ] {
            assert!(angle > -PI && angle <= PI, "{angle} out of range");
        }

        let back = elements.state_vectors(MU_EARTH).unwrap();
        assert!(sv.abs_diff(&back) < 1e-3, "{sv:?} vs {back:?}");
    }

    #[test]
    fn state_to_elements_to_state() {
        let sv = StateVectors::from_components(
            -5_291_613.581,
            2_537_299.359,
            3_181_473.395,
            -4_154.033,
            -6_724.524,
            -75.268,
        );

        let elements = sv.elements(MU).unwrap();
        let back = elements.state_vectors(MU).unwrap();

        assert!(sv.abs_diff(&back) < 1e-3, "{sv:?} vs {back:?}");
    }

    #[test]
    fn circular_orbit_is_degenerate() {
        let r: Num = 7_000_000.0;
        let v = (MU_EARTH / r).sqrt();
        let i: Num = 0.5;
        let sv = StateVectors::from_components(r, 0.0, 0.0, 0.0, v * i.cos(), v * i.sin());

        assert_eq!(
            sv.elements(MU_EARTH),
            Err(Error::DegenerateGeometry(Degeneracy::Circular))
        );
    }

    #[test_case(1.0; "prograde")]
    #[test_case(-1.0; "retrograde")]
    fn equatorial_orbit_is_degenerate(direction: Num) {
        let sv = StateVectors::from_components(7_000_000.0, 0.0, 0.0, 0.0, direction * 8_000.0, 0.0);

        assert_eq!(
            sv.elements(MU_EARTH),
            Err(Error::DegenerateGeometry(Degeneracy::Equatorial))
        );
    }

    #[test_case(StateVectors::from_components(7_000_000.0, 0.0, 0.0, 1_000.0, 0.0, 0.0); "exactly radial")]
    #[test_case(StateVectors::from_components(7_000_000.0, 0.0, 0.0, 1_000.0, 1e-9, 1e-9); "nearly radial")]
    #[test_case(StateVectors::from_components(7_000_000.0, 0.0, 0.0, -2_000.0, 1e-4, 0.0); "nearly radial infall")]
    fn radial_trajectory_is_degenerate(sv: StateVectors) {
        assert_eq!(
            sv.elements(MU_EARTH),
            Err(Error::DegenerateGeometry(Degeneracy::Rectilinear))
        );
    }

    #[test]
    fn escape_trajectory_is_rejected() {
        let r: Num = 7_000_000.0;
        let escape = (2.0 * MU_EARTH / r).sqrt();
        let sv = StateVectors::from_components(r, 0.0, 0.0, 0.0, escape * 0.6, escape * 0.9);

        assert!(matches!(
            sv.elements(MU_EARTH),
            Err(Error::InvalidInput {
                parameter: "velocity",
                ..
            })
        ));
    }

    #[test_case(StateVectors::default(), "position"; "origin")]
    #[test_case(StateVectors::from_components(Num::NAN, 0.0, 0.0, 0.0, 1.0, 0.0), "position"; "nan position")]
    #[test_case(StateVectors::from_components(1.0, 0.0, 0.0, 0.0, Num::INFINITY, 0.0), "velocity"; "infinite velocity")]
    fn rejects_invalid_state(sv: StateVectors, expected: &str) {
        match sv.elements(MU_EARTH) {
            Err(Error::InvalidInput { parameter, .. }) => assert_eq!(parameter, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_mu() {
        let sv = StateVectors::from_components(7e6, 0.0, 0.0, 0.0, 7e3, 1e3);

        assert!(matches!(
            sv.elements(0.0),
            Err(Error::InvalidInput {
                parameter: "mu",
                ..
            })
        ));
    }

    #[test]
    fn derived_quantities() {
        let elements = KeplerianElements::new(7_000_000.0, 0.1, 0.5, 1.0, 0.5, 1.0);
        let sv = elements.state_vectors(MU).unwrap();

        assert_relative_eq!(
            sv.specific_energy(MU),
            -MU / (2.0 * elements.semi_major_axis),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            sv.specific_angular_momentum().length(),
            elements.specific_angular_momentum(MU),
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(sv.abs_diff(&sv), 0.0);
        assert!(sv.radius() >= elements.periapsis_radius());
        assert!(sv.radius() <= elements.apoapsis_radius());
        assert!(sv.speed() > 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_vectors() {
        let sv = StateVectors::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        let json = serde_json::to_string(&sv).unwrap();
        let back: StateVectors = serde_json::from_str(&json).unwrap();

        assert_eq!(back, sv);
    }
}
