//! Night clock, encounter handling, and tick cycle for the Vigil
//! simulation.
//!
//! This crate owns everything that happens once per simulation step:
//! the night clock escalates the enemies each in-game hour, the repel
//! interaction filters agents through the player's view cone, the scare
//! orchestrator runs the jump-scare session when an agent connects, and
//! [`tick::run_tick`] sequences all of it.
//!
//! # Modules
//!
//! - [`clock`] -- [`NightClock`]: hour progression, hourly difficulty
//!   escalation, the one-shot win signal, and the HUD hour text.
//! - [`config`] -- Configuration loading from `vigil-config.yaml` into
//!   strongly-typed structs.
//! - [`encounter`] -- The targeted repel interaction (view-cone filter).
//! - [`ports`] -- Traits for the external collaborators (scene loading,
//!   cursor, audio, HUD text).
//! - [`runner`] -- Bounded async simulation loop over an [`InputSource`].
//! - [`scare`] -- [`ScareOrchestrator`]: the timed jump-scare session.
//! - [`tick`] -- [`SimulationState`] and the phased per-tick cycle.
//!
//! [`NightClock`]: clock::NightClock
//! [`ScareOrchestrator`]: scare::ScareOrchestrator
//! [`SimulationState`]: tick::SimulationState
//! [`InputSource`]: runner::InputSource

pub mod clock;
pub mod config;
pub mod encounter;
pub mod ports;
pub mod runner;
pub mod scare;
pub mod tick;
