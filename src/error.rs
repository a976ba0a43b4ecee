use thiserror::Error;

use crate::Num;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid input: {parameter} = {value}")]
    InvalidInput { parameter: &'static str, value: Num },

    #[error("Newton iteration did not converge after {iterations} iterations (last step = {step})")]
    NonConvergence { iterations: usize, step: Num },

    #[error("classical elements are undefined for this geometry: {0}")]
    DegenerateGeometry(Degeneracy),
}

/// Geometries for which the classical elements are singular.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// e = 0, the periapsis direction is undefined
    #[error("circular orbit")]
    Circular,

    /// i = 0 or i = π, the line of nodes is undefined
    #[error("equatorial orbit")]
    Equatorial,

    /// position parallel to velocity, there is no orbital plane
    #[error("rectilinear trajectory")]
    Rectilinear,
}

impl Error {
    pub(crate) fn invalid(parameter: &'static str, value: Num) -> Self {
        Self::InvalidInput { parameter, value }
    }
}

impl From<Degeneracy> for Error {
    fn from(degeneracy: Degeneracy) -> Self {
        Self::DegenerateGeometry(degeneracy)
    }
}
