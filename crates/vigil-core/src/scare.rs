//! The jump-scare orchestrator.
//!
//! When an agent reaches attack range, the orchestrator runs the loss
//! sequence: every other agent is sent home, the attacker is teleported
//! to the scare point in front of the player, a one-shot audio cue
//! fires, and a camera shake runs for a fixed duration. When the shake
//! ends the camera is restored, the cursor is released, and the loss
//! scene transition is issued.
//!
//! The sequence is an explicit state object advanced once per tick by
//! [`ScareOrchestrator::advance`] -- no suspension construct, just
//! elapsed time against a duration. At most one session can be active;
//! triggers while active are silent no-ops.

use glam::Vec3;
use rand::Rng;
use tracing::{debug, info, warn};
use vigil_agents::EnemyAgent;
use vigil_types::{AgentId, CameraRig, SceneId};

use crate::config::ScareConfig;
use crate::ports::Ports;

/// Errors that can occur constructing the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ScareError {
    /// Invalid scare configuration.
    #[error("invalid scare configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Progress report from advancing the scare sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScareStatus {
    /// No session is running.
    Inactive,
    /// The shake is still running; the camera was perturbed this tick.
    Shaking,
    /// The session just finished; the loss transition has been issued.
    Completed,
}

/// A running jump-scare session.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScareSession {
    /// The agent that caught the player.
    attacker: AgentId,
    /// Seconds of shake elapsed so far.
    elapsed: f32,
}

/// Orchestrates the timed jump-scare/loss sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScareOrchestrator {
    /// Scare tuning (point, intensity, duration, audio cue).
    config: ScareConfig,
    /// The active session, if any. At most one at a time.
    session: Option<ScareSession>,
}

impl ScareOrchestrator {
    /// Build the orchestrator from config, validating the tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ScareError::InvalidConfig`] if the shake duration is
    /// not finite and positive, the intensity is not finite and
    /// non-negative, or the scare point is not finite.
    pub fn new(config: ScareConfig) -> Result<Self, ScareError> {
        if !config.shake_duration.is_finite() || config.shake_duration <= 0.0 {
            return Err(ScareError::InvalidConfig {
                reason: format!(
                    "shake_duration must be finite and positive, got {}",
                    config.shake_duration
                ),
            });
        }
        if !config.shake_intensity.is_finite() || config.shake_intensity < 0.0 {
            return Err(ScareError::InvalidConfig {
                reason: format!(
                    "shake_intensity must be finite and non-negative, got {}",
                    config.shake_intensity
                ),
            });
        }
        if !config.point.is_finite() {
            return Err(ScareError::InvalidConfig {
                reason: String::from("scare point must be finite"),
            });
        }
        Ok(Self {
            config,
            session: None,
        })
    }

    /// Whether a session is currently running.
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The attacker of the active session, if any.
    pub fn attacker(&self) -> Option<AgentId> {
        self.session.map(|s| s.attacker)
    }

    /// Begin the jump-scare sequence for the given attacker.
    ///
    /// Every other agent is repelled, the attacker is teleported to the
    /// scare point facing the player, and the audio cue fires. Returns
    /// `false` without side effects when a session is already active or
    /// the attacker is not in the roster.
    pub fn trigger(
        &mut self,
        attacker: AgentId,
        agents: &mut [EnemyAgent],
        player_position: Vec3,
        ports: &mut dyn Ports,
        rng: &mut impl Rng,
    ) -> bool {
        if self.session.is_some() {
            debug!(%attacker, "scare trigger ignored, session already active");
            return false;
        }
        if !agents.iter().any(|a| a.id() == attacker) {
            warn!(%attacker, "scare trigger ignored, attacker not in roster");
            return false;
        }

        for agent in &mut *agents {
            if agent.id() == attacker {
                agent.relocate(self.config.point);
                agent.face(player_position);
            } else {
                agent.repel(rng);
            }
        }

        ports.play_cue(&self.config.audio_cue);
        self.session = Some(ScareSession {
            attacker,
            elapsed: 0.0,
        });
        info!(%attacker, duration = self.config.shake_duration, "jump scare started");
        true
    }

    /// Advance the active session by one simulation step.
    ///
    /// While the shake runs, the camera's local offset is perturbed by a
    /// random offset inside a sphere of the configured intensity and the
    /// camera is forced to look at the scare point. When the duration
    /// elapses the camera is restored, the cursor released, and the loss
    /// scene requested -- exactly once per session.
    pub fn advance(
        &mut self,
        dt: f32,
        camera: &mut CameraRig,
        ports: &mut dyn Ports,
        rng: &mut impl Rng,
    ) -> ScareStatus {
        let Some(session) = self.session.as_mut() else {
            return ScareStatus::Inactive;
        };

        session.elapsed += dt;
        if session.elapsed < self.config.shake_duration {
            let offset = random_in_unit_sphere(rng) * self.config.shake_intensity;
            camera.set_shake_offset(offset);
            camera.look_at(self.config.point);
            return ScareStatus::Shaking;
        }

        camera.clear_shake();
        ports.set_locked(false);
        ports.set_visible(true);
        ports.load_scene(SceneId::Lose);
        info!(attacker = %session.attacker, "jump scare finished, loss issued");
        self.session = None;
        ScareStatus::Completed
    }
}

/// Uniform random point inside the unit sphere (rejection sampled).
fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
