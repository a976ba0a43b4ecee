//! Conversions between classical orbital elements and Cartesian state
//! vectors for two-body elliptic orbits.
//!
//! ```
//! use keplerian_transform::{Config, KeplerianElements};
//!
//! let config = Config::new(3.986e14).unwrap();
//! let elements = KeplerianElements::new(7_000_000.0, 0.1, 0.5, 1.0, 0.5, 1.0);
//!
//! let state_vectors = elements.to_state_vectors(&config).unwrap();
//! let recovered = state_vectors.to_elements(&config).unwrap();
//!
//! assert!(elements.angle_abs_diff(&recovered) < 1e-9);
//! ```
//!
//! All quantities are SI: meters, meters per second, radians and
//! m^3 s^-2 for the gravitational parameter, which is always passed in
//! explicitly, either as a bare `mu` or inside a [`Config`].

#![allow(non_snake_case)]

pub mod astro;
pub mod config;
pub mod constants;
pub mod elements;
pub mod error;
pub mod math;
pub mod state_vectors;

pub use self::config::Config;
pub use self::constants::*;
pub use self::elements::KeplerianElements;
pub use self::error::{Degeneracy, Error, Result};
pub use self::state_vectors::StateVectors;

pub type Num = f64;

pub use glam::{dvec3 as vec3, DMat3 as Mat3, DVec3 as Vec3};
