use crate::constants::{KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, PI, TWO_PI};
use crate::math::newton_approx;
use crate::{Error, Num, Result};

/// Above this eccentricity Newton's method is seeded at apoapsis instead
/// of at the mean anomaly, which overshoots badly near periapsis.
const HIGH_ECCENTRICITY: Num = 0.8;

/// Eccentric Anomaly (E) is given by the equation:
/// M = E - e * sin(E)
/// where
/// M is the mean anomaly
/// e is the eccentricity
///
/// Solved with the default tolerance of 1e-12 rad, see [`estimate_anomaly`].
///
/// https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/elliptical-orbits.html#equation-eq-keplers-equation-ellipse
///
/// ```
/// use keplerian_transform::astro::elliptic::solve_kepler;
///
/// let E = solve_kepler(1.0, 0.1).unwrap();
///
/// assert!((E - 0.1 * E.sin() - 1.0).abs() < 1e-12);
/// ```
pub fn solve_kepler(M: Num, e: Num) -> Result<Num> {
    estimate_anomaly(M, e, KEPLER_TOLERANCE, KEPLER_MAX_ITERATIONS)
}

/// Newton-Raphson solution of Kepler's equation for the eccentric anomaly.
///
/// Requires `0 <= e < 1`, convergence is not guaranteed otherwise and the
/// input is rejected. Iteration stops once a step is no larger than
/// `tolerance`, or fails with [`Error::NonConvergence`] after
/// `max_iterations` steps.
pub fn estimate_anomaly(
    // Mean anomaly
    M: Num,
    // Eccentricity
    e: Num,
    tolerance: Num,
    max_iterations: usize,
) -> Result<Num> {
    if !(0.0..1.0).contains(&e) {
        return Err(Error::invalid("eccentricity", e));
    }

    if !M.is_finite() {
        return Err(Error::invalid("mean_anomaly", M));
    }

    let E0 = if e < HIGH_ECCENTRICITY {
        M
    } else {
        // Apoapsis of the revolution M falls in
        M - M.rem_euclid(TWO_PI) + PI
    };

    newton_approx(
        // f(E) = E - e*sin(E) - M
        |E| E - (e * E.sin()) - M,
        // f'(E) = 1 - e*cos(E)
        |E| 1.0 - (e * E.cos()),
        E0,
        tolerance,
        max_iterations,
    )
}

/// Kepler's equation in the forward direction
pub fn mean_anomaly(E: Num, e: Num) -> Num {
    E - e * E.sin()
}

pub fn true_anomaly(E: Num, e: Num) -> Num {
    // https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/elliptical-orbits.html#equation-eq-eccentric-anomaly-true-anomaly-ellipse
    // Half-angle form through atan2 so E = π does not blow up
    2.0 * Num::atan2((1.0 + e).sqrt() * (E / 2.0).sin(), (1.0 - e).sqrt() * (E / 2.0).cos())
}

pub fn eccentric_anomaly_from_true(v: Num, e: Num) -> Num {
    2.0 * Num::atan2((1.0 - e).sqrt() * (v / 2.0).sin(), (1.0 + e).sqrt() * (v / 2.0).cos())
}
