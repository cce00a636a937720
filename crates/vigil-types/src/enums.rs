//! Fieldless enums shared across the workspace.

use serde::{Deserialize, Serialize};

/// Identifier for a scene the surrounding presentation layer can load.
///
/// The core never loads scenes itself; it hands one of these to the
/// scene port when a terminal transition (win, loss) is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    /// The playable night scene.
    Game,
    /// The loss presentation shown after a jump scare completes.
    Lose,
    /// The win presentation shown after surviving until 6 AM.
    Win,
    /// The title screen.
    Title,
}

impl SceneId {
    /// Return the literal scene name the presentation layer keys on.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Game => "GameScene",
            Self::Lose => "LoseScene",
            Self::Win => "WinScene",
            Self::Title => "TitleScene",
        }
    }
}

impl core::fmt::Display for SceneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Behavioral phase of an enemy agent.
///
/// Transitions are driven by the agent's per-tick logic:
/// `Idle -> FollowingPath | DirectChase` on a successful advance roll,
/// `FollowingPath -> DirectChase` past the final waypoint,
/// `DirectChase -> Attacking` inside attack range, and any phase back to
/// `Idle` on repel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// At rest, counting down the wait timer between advance attempts.
    Idle,
    /// Advancing along the scripted waypoint path.
    FollowingPath,
    /// Advancing straight at the player.
    DirectChase,
    /// Within attack range; terminal for the encounter until repelled.
    Attacking,
}

impl AgentPhase {
    /// Whether the agent is moving (on the path or chasing directly).
    pub const fn is_advancing(self) -> bool {
        matches!(self, Self::FollowingPath | Self::DirectChase)
    }
}
