use crate::{Error, Num, Result, PI, TWO_PI};

/// Approximates the root of a function using the Newton-Raphson method.
///
/// # Arguments
/// f - The function to approximate the root of.
/// f_prime - The derivative of the function.
/// x0 - The initial guess.
/// epsilon - The largest step still counted as converged.
/// max_steps - The number of steps after which we give up.
///
/// # Returns
/// The approximate root of the function, or [`Error::NonConvergence`]
/// if the steps never got smaller than `epsilon`.
pub fn newton_approx(
    f: impl Fn(Num) -> Num,
    f_prime: impl Fn(Num) -> Num,
    x0: Num,
    epsilon: Num,
    max_steps: usize,
) -> Result<Num> {
    let mut x = x0;
    let mut error = Num::INFINITY;

    for step in 0..max_steps {
        let x_next = x - f(x) / f_prime(x);

        error = (x_next - x).abs();

        tracing::trace!(step, x = x_next, error, "newton step");

        if error <= epsilon {
            return Ok(x_next);
        }

        x = x_next;
    }

    tracing::warn!(x0, x, error, max_steps, "newton iteration failed to converge");

    Err(Error::NonConvergence {
        iterations: max_steps,
        step: error,
    })
}

/// Maps an angle into [0, 2π)
pub fn normalize_angle(angle: Num) -> Num {
    let wrapped = angle.rem_euclid(TWO_PI);

    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

/// Difference `a - b` wrapped into (-π, π]
pub fn wrap_angle_diff(a: Num, b: Num) -> Num {
    let diff = normalize_angle(a - b);

    if diff > PI {
        diff - TWO_PI
    } else {
        diff
    }
}
