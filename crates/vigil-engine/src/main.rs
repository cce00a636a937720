//! Headless night-simulation binary for Vigil.
//!
//! Wires the tick cycle together and runs one full night without a
//! presentation layer: boundary calls (scene loads, cursor, audio, HUD
//! text) go to a no-op sink, and the player stands idle at the origin.
//! Useful for tuning agent rosters and soak-testing the simulation.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `vigil-config.yaml`
//! 3. Seed the RNG from the configured world seed
//! 4. Assemble the simulation state (clock, roster, camera, scare)
//! 5. Run the paced simulation loop
//! 6. Log the outcome

mod error;

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vigil_core::config::SimulationConfig;
use vigil_core::ports::NoOpPorts;
use vigil_core::runner::{self, IdleInput};
use vigil_core::tick::SimulationState;

use crate::error::EngineError;

/// Application entry point for the night simulation.
///
/// Initializes all subsystems and runs one night to completion.
///
/// # Errors
///
/// Returns an error if configuration loading or state assembly fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("vigil-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_dt = config.world.tick_dt,
        tick_interval_ms = config.world.tick_interval_ms,
        hour_duration = config.night.hour_duration,
        agent_count = config.agents.len(),
        "configuration loaded"
    );

    // 3. Seed the RNG.
    let mut rng = SmallRng::seed_from_u64(config.world.seed);

    // 4. Assemble the simulation state.
    let mut state = SimulationState::from_config(&config, &mut rng).map_err(EngineError::from)?;
    info!(
        agents = state.agents.len(),
        hour_text = state.clock.hour_text(),
        "simulation state assembled, entering tick loop"
    );

    // 5. Run the simulation.
    let mut input = IdleInput::new(config.world.tick_dt, glam::Vec3::ZERO);
    let mut ports = NoOpPorts;
    let result = runner::run_simulation(
        &mut state,
        &mut input,
        &mut ports,
        &mut rng,
        config.world.tick_interval_ms,
        config.simulation.max_ticks,
    )
    .await;

    // 6. Log the outcome.
    info!(
        outcome = %result.outcome,
        ticks = result.ticks,
        final_hour = result.final_hour,
        events = result.events.len(),
        "vigil-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `vigil-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it is absent.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("vigil-config.yaml");
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        info!("config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
