//! The paced simulation loop.
//!
//! Drives [`run_tick`] until the night resolves: the player survives to
//! dawn, a jump-scare completes, the input source runs dry, or the tick
//! bound is hit. Pacing is wall-clock -- the runner sleeps between ticks
//! so a headless night takes roughly as long as a played one; a zero
//! interval runs flat out for tests and replays.

use rand::Rng;
use tokio::time::{Duration, sleep};
use tracing::info;
use vigil_types::SimEvent;

use crate::ports::Ports;
use crate::tick::{SimulationState, TickInput, run_tick};

/// Producer of per-tick player input.
///
/// Decouples the loop from where input comes from: a live input device,
/// a recorded session, or a synthetic script. Returning `None` ends the
/// run.
pub trait InputSource {
    /// The input for the next tick, or `None` when exhausted.
    fn next_input(&mut self) -> Option<TickInput>;
}

/// An input source that repeats the same idle step forever.
///
/// Models an unattended player: never paused, never repelling. Useful
/// for headless soak runs.
#[derive(Debug, Clone, Copy)]
pub struct IdleInput {
    step: TickInput,
}

impl IdleInput {
    /// Repeat an unpaused, action-free step of `dt` seconds with the
    /// player at the given position.
    pub const fn new(dt: f32, player_position: glam::Vec3) -> Self {
        Self {
            step: TickInput::step(dt, player_position),
        }
    }
}

impl InputSource for IdleInput {
    fn next_input(&mut self) -> Option<TickInput> {
        Some(self.step)
    }
}

/// An input source that replays a fixed sequence, then ends the run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: std::collections::VecDeque<TickInput>,
}

impl ScriptedInput {
    /// Build a script from a tick-ordered input sequence.
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self) -> Option<TickInput> {
        self.inputs.pop_front()
    }
}

/// How a run of the night ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightOutcome {
    /// The clock reached dawn with the player untouched.
    Survived,
    /// A jump-scare ran to completion.
    Caught,
    /// The tick bound was reached before the night resolved.
    MaxTicksReached,
    /// The input source ran dry before the night resolved.
    InputExhausted,
}

impl std::fmt::Display for NightOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Survived => "survived",
            Self::Caught => "caught",
            Self::MaxTicksReached => "max ticks reached",
            Self::InputExhausted => "input exhausted",
        };
        f.write_str(label)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// How the run ended.
    pub outcome: NightOutcome,
    /// Total ticks executed.
    pub ticks: u64,
    /// The night hour when the run ended.
    pub final_hour: u8,
    /// Every observable event the run produced, in order.
    pub events: Vec<SimEvent>,
}

/// Run the simulation loop until the night resolves.
///
/// Publishes the opening hour string, then ticks the state with input
/// pulled from `input`, sleeping `tick_interval_ms` of wall time between
/// ticks. A `max_ticks` of zero means unbounded.
pub async fn run_simulation(
    state: &mut SimulationState,
    input: &mut dyn InputSource,
    ports: &mut dyn Ports,
    rng: &mut impl Rng,
    tick_interval_ms: u64,
    max_ticks: u64,
) -> SimulationResult {
    state.publish_hour(ports);

    let mut events = Vec::new();
    let outcome = loop {
        if max_ticks > 0 && state.tick_count() >= max_ticks {
            break NightOutcome::MaxTicksReached;
        }
        let Some(tick_input) = input.next_input() else {
            break NightOutcome::InputExhausted;
        };

        let summary = run_tick(state, &tick_input, ports, rng);
        events.extend(summary.events.iter().cloned());

        if summary.survived() {
            break NightOutcome::Survived;
        }
        if summary.lost() {
            break NightOutcome::Caught;
        }

        if tick_interval_ms > 0 {
            sleep(Duration::from_millis(tick_interval_ms)).await;
        }
    };

    let result = SimulationResult {
        outcome,
        ticks: state.tick_count(),
        final_hour: state.clock.hour(),
        events,
    };
    info!(
        outcome = %result.outcome,
        ticks = result.ticks,
        hour = result.final_hour,
        "night finished"
    );
    result
}
