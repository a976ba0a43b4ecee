//! Converts an ISS-like orbit to state vectors and back.
//!
//! RUST_LOG=keplerian_transform=trace cargo run --example round_trip

use keplerian_transform::{Config, Error, KeplerianElements, StateVectors, MU_EARTH};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::new(MU_EARTH)?;

    let iss = KeplerianElements::new(6_778_000.0, 0.01, 0.9006, 0.5, 1.2, 2.0);
    let state_vectors = iss.to_state_vectors(&config)?;
    let recovered = state_vectors.to_elements(&config)?;

    println!("elements      = {iss:#?}");
    println!("state vectors = {state_vectors:#?}");
    println!("recovered     = {:#?}", recovered.normalized());
    println!("period        = {:.1} s", iss.period(config.mu));

    // Circular orbits have no periapsis to measure ω and M from
    let v = (MU_EARTH / 7_000_000.0).sqrt();
    let circular = StateVectors::from_components(7_000_000.0, 0.0, 0.0, 0.0, v * 0.6, v * 0.8);

    match circular.to_elements(&config) {
        Ok(elements) => println!("unexpected elements for circular orbit: {elements:?}"),
        Err(err) => println!("circular orbit: {err}"),
    }

    Ok(())
}
