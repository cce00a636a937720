//! Enemy agent state machine for the Vigil night simulation.
//!
//! This crate contains the per-enemy logic layer -- everything that
//! advances, repels, or escalates a single agent without touching I/O.
//! It sits between `vigil-types` (which defines the shared vocabulary)
//! and `vigil-core` (which orchestrates the night).
//!
//! # Modules
//!
//! - [`agent`] -- The [`EnemyAgent`] state machine: idle roll, waypoint
//!   pursuit, direct chase, attack detection, repel, escalation.
//! - [`config`] -- Spawn definitions and tunable parameters
//!   ([`AgentSpec`], [`AgentParams`]).
//! - [`error`] -- Construction-time validation errors ([`AgentError`]).

pub mod agent;
pub mod config;
pub mod error;

pub use agent::{AgentTickEvent, EnemyAgent, WAYPOINT_EPSILON};
pub use config::{AgentParams, AgentSpec};
pub use error::AgentError;
