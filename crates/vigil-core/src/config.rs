//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `vigil-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads the file. Field
//! defaults match the original level tuning, so an empty file yields a
//! playable night.

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use vigil_agents::AgentSpec;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `vigil-config.yaml`. All fields have
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, tick pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Night timeline settings.
    #[serde(default)]
    pub night: NightConfig,

    /// Repel interaction settings.
    #[serde(default)]
    pub repel: RepelConfig,

    /// Jump-scare sequence settings.
    #[serde(default)]
    pub scare: ScareConfig,

    /// Pause behavior settings.
    #[serde(default)]
    pub pause: PauseConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Enemy roster: one spawn spec per agent.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulation seconds advanced per tick.
    #[serde(default = "default_tick_dt")]
    pub tick_dt: f32,

    /// Real-time milliseconds the runner sleeps between ticks
    /// (0 runs as fast as possible; useful for tests and replays).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_dt: default_tick_dt(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Night timeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NightConfig {
    /// Seconds of simulation time per in-game hour.
    #[serde(default = "default_hour_duration")]
    pub hour_duration: f32,

    /// Hourly difficulty escalation deltas.
    #[serde(default)]
    pub escalation: EscalationConfig,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            hour_duration: default_hour_duration(),
            escalation: EscalationConfig::default(),
        }
    }
}

/// Hourly difficulty escalation deltas applied to every agent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EscalationConfig {
    /// Added to each agent's advance chance per hour (clamped to `[0, 1]`).
    #[serde(default = "default_advance_chance_delta")]
    pub advance_chance_delta: f32,

    /// Added to each agent's movement speed per hour.
    #[serde(default = "default_speed_delta")]
    pub speed_delta: f32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            advance_chance_delta: default_advance_chance_delta(),
            speed_delta: default_speed_delta(),
        }
    }
}

/// Repel interaction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RepelConfig {
    /// Maximum angle in degrees between the camera forward vector and the
    /// bearing to an agent for a repel to land.
    #[serde(default = "default_repel_angle")]
    pub angle_threshold_deg: f32,
}

impl Default for RepelConfig {
    fn default() -> Self {
        Self {
            angle_threshold_deg: default_repel_angle(),
        }
    }
}

/// Jump-scare sequence configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScareConfig {
    /// World position the attacker is teleported to for the scare.
    #[serde(default = "default_scare_point")]
    pub point: Vec3,

    /// Radius of the random camera perturbation per shake tick.
    #[serde(default = "default_shake_intensity")]
    pub shake_intensity: f32,

    /// Seconds the camera shake runs before the loss transition.
    #[serde(default = "default_shake_duration")]
    pub shake_duration: f32,

    /// Handle of the one-shot audio cue played when the scare starts.
    #[serde(default = "default_scare_cue")]
    pub audio_cue: String,
}

impl Default for ScareConfig {
    fn default() -> Self {
        Self {
            point: default_scare_point(),
            shake_intensity: default_shake_intensity(),
            shake_duration: default_shake_duration(),
            audio_cue: default_scare_cue(),
        }
    }
}

/// Pause behavior configuration.
///
/// The two pause variants in the field differ only in whether pausing
/// also re-aims the camera at a fixed point; both are expressed here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PauseConfig {
    /// When set, a paused tick re-aims the camera at this point.
    #[serde(default)]
    pub look_at_target: Option<Vec3>,
}

/// Simulation boundary parameters for the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks to run (0 means unbounded).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self { max_ticks: 0 }
    }
}

fn default_world_name() -> String {
    String::from("vigil-night")
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_dt() -> f32 {
    0.05
}

const fn default_tick_interval_ms() -> u64 {
    50
}

const fn default_hour_duration() -> f32 {
    45.0
}

const fn default_advance_chance_delta() -> f32 {
    0.10
}

const fn default_speed_delta() -> f32 {
    0.5
}

const fn default_repel_angle() -> f32 {
    30.0
}

const fn default_scare_point() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

const fn default_shake_intensity() -> f32 {
    0.2
}

const fn default_shake_duration() -> f32 {
    1.5
}

fn default_scare_cue() -> String {
    String::from("jump_scare")
}
