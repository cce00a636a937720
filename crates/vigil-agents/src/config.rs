//! Spawn definitions and tunable parameters for enemy agents.
//!
//! An [`AgentSpec`] is what the configuration file describes: a name, a
//! home pose, an optional waypoint path, and the [`AgentParams`] tuning
//! block. Defaults match the original level tuning: slow movers that roll
//! for an advance every few seconds and rarely win the roll at hour zero.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tunable behavior parameters for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Movement speed in units per second. Escalated each hour.
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Distance at which the agent attacks.
    #[serde(default = "default_attack_distance")]
    pub attack_distance: f32,

    /// Probability in `[0, 1]` of advancing when the wait timer expires.
    /// Escalated (and clamped) each hour.
    #[serde(default = "default_advance_chance")]
    pub advance_chance: f32,

    /// Minimum seconds between advance attempts.
    #[serde(default = "default_min_wait")]
    pub min_wait: f32,

    /// Maximum seconds between advance attempts.
    #[serde(default = "default_max_wait")]
    pub max_wait: f32,

    /// Turn rate factor in radians per second for the smoothed facing.
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            attack_distance: default_attack_distance(),
            advance_chance: default_advance_chance(),
            min_wait: default_min_wait(),
            max_wait: default_max_wait(),
            turn_speed: default_turn_speed(),
        }
    }
}

/// Spawn definition for one agent, as read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Display name, used in logs and duplicate detection.
    pub name: String,

    /// Home position the agent rests at and is repelled back to.
    pub home: Vec3,

    /// Home facing in radians (0 faces +Z).
    #[serde(default)]
    pub yaw: f32,

    /// Ordered waypoint path walked before chasing directly. May be empty,
    /// in which case the agent chases directly as soon as it advances.
    #[serde(default)]
    pub waypoints: Vec<Vec3>,

    /// Behavior tuning; every field has a default.
    #[serde(default)]
    pub params: AgentParams,
}

const fn default_speed() -> f32 {
    2.0
}

const fn default_attack_distance() -> f32 {
    1.0
}

const fn default_advance_chance() -> f32 {
    0.25
}

const fn default_min_wait() -> f32 {
    3.0
}

const fn default_max_wait() -> f32 {
    7.0
}

const fn default_turn_speed() -> f32 {
    5.0
}
