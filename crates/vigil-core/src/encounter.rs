//! The targeted repel interaction.
//!
//! When the player issues a repel action, every agent whose bearing from
//! the camera falls inside the configured view cone is sent home. The
//! check is independent per agent -- one action can repel zero, one, or
//! many agents at once -- and carries no state between invocations.

use rand::Rng;
use tracing::debug;
use vigil_agents::EnemyAgent;
use vigil_types::{AgentId, CameraRig};

use crate::config::RepelConfig;

/// Errors that can occur constructing the coordinator.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    /// Invalid repel configuration.
    #[error("invalid repel configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Per-invocation geometric filter for the repel action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncounterCoordinator {
    /// View-cone half angle in radians.
    angle_threshold: f32,
}

impl EncounterCoordinator {
    /// Build the coordinator from config, validating the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EncounterError::InvalidConfig`] if the angle threshold
    /// is not finite or is negative.
    pub fn new(config: &RepelConfig) -> Result<Self, EncounterError> {
        let degrees = config.angle_threshold_deg;
        if !degrees.is_finite() || degrees < 0.0 {
            return Err(EncounterError::InvalidConfig {
                reason: format!(
                    "angle_threshold_deg must be finite and non-negative, got {degrees}"
                ),
            });
        }
        Ok(Self {
            angle_threshold: degrees.to_radians(),
        })
    }

    /// The view-cone half angle in radians.
    pub const fn angle_threshold(&self) -> f32 {
        self.angle_threshold
    }

    /// Repel every agent inside the camera's view cone.
    ///
    /// Returns the IDs of the agents that were repelled, in roster
    /// order. Agents outside the cone are untouched; an action that
    /// repels nobody is a silent no-op, not an error.
    pub fn attempt_repel(
        &self,
        camera: &CameraRig,
        agents: &mut [EnemyAgent],
        rng: &mut impl Rng,
    ) -> Vec<AgentId> {
        let mut repelled = Vec::new();
        for agent in &mut *agents {
            let angle = camera.angle_to(agent.pose().position);
            if angle <= self.angle_threshold {
                agent.repel(rng);
                repelled.push(agent.id());
            } else {
                debug!(
                    agent = %agent.name(),
                    angle_deg = angle.to_degrees(),
                    threshold_deg = self.angle_threshold.to_degrees(),
                    "not in view, repel missed"
                );
            }
        }
        repelled
    }
}
