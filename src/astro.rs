use crate::constants::{G, TWO_PI};
use crate::Num;

pub mod elliptic;

/// https://en.wikipedia.org/wiki/Standard_gravitational_parameter
#[inline]
pub fn standard_gravitational_parameter(mass: Num) -> Num {
    G * mass
}

/// https://en.wikipedia.org/wiki/Orbital_period
pub fn period(a: Num, mu: Num) -> Num {
    TWO_PI * (a.powi(3) / mu).sqrt()
}

/// https://en.wikipedia.org/wiki/Mean_motion
pub fn mean_motion(a: Num, mu: Num) -> Num {
    (mu / a.powi(3)).sqrt()
}

/// Magnitude of the specific angular momentum of an elliptic orbit,
/// derived from the semi-latus rectum p = a(1 - e^2)
pub fn specific_angular_momentum(a: Num, e: Num, mu: Num) -> Num {
    (mu * a * (1.0 - e.powi(2))).sqrt()
}
