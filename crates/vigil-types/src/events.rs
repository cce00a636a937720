//! Observable simulation events.
//!
//! Each tick collects the events that occurred into its summary so that
//! observers (the engine log, tests) can see what happened without
//! inspecting internal state.

use serde::{Deserialize, Serialize};

use crate::ids::AgentId;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SimEvent {
    /// The night clock rolled over to a new hour and escalated all agents.
    HourAdvanced {
        /// The hour just reached (1..=6).
        hour: u8,
    },
    /// An idle agent won its advance roll and started moving.
    AgentAdvancing {
        /// The agent that started advancing.
        id: AgentId,
    },
    /// An agent was sent back to its home pose.
    AgentRepelled {
        /// The repelled agent.
        id: AgentId,
    },
    /// An agent reached attack range of the player.
    AttackTriggered {
        /// The attacking agent.
        id: AgentId,
    },
    /// A jump-scare session began.
    ScareStarted {
        /// The attacker the session was started for.
        id: AgentId,
    },
    /// The jump-scare session finished and the loss transition was issued.
    ScareEnded,
    /// The player survived the whole night (emitted exactly once).
    NightSurvived,
}
