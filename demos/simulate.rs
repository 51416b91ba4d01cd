//! Runs the vending fleet simulation and prints the report as JSON.
//!
//! ```text
//! cargo run --example simulate                 # defaults: 3 machines, 10 events
//! cargo run --example simulate -- config.json  # camelCase SimulationConfig
//! RUST_LOG=debug cargo run --example simulate  # per-handler diagnostics
//! ```

use vending_bus::{Simulation, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    let simulation = Simulation::new(config)?;
    let report = simulation.run()?;

    println!("{}", report.to_json_pretty()?);
    Ok(())
}
