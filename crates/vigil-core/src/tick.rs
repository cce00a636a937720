//! The per-tick simulation cycle.
//!
//! Each tick runs through these phases:
//!
//! 1. **Pause gate** -- a paused tick advances nothing; at most it
//!    re-aims the camera at the configured pause target.
//! 2. **Night clock** -- hour progression, hourly escalation, HUD text,
//!    and the one-shot win transition.
//! 3. **Scare session** -- an active jump-scare advances its shake and
//!    eventually issues the loss transition.
//! 4. **Repel action** -- when the player pressed repel this tick, the
//!    view-cone filter runs over the roster.
//! 5. **Agents** -- every agent ticks; attack events feed the scare
//!    orchestrator.
//!
//! The cycle is single-threaded and cooperative: each authority mutates
//! the agent collection in its own phase, never interleaved within one.
//! Given the same seed and inputs, a tick sequence replays exactly.

use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};
use vigil_agents::{AgentError, AgentTickEvent, EnemyAgent};
use vigil_types::{CameraRig, SceneId, SimEvent};

use crate::clock::{ClockError, NightClock};
use crate::config::{EscalationConfig, PauseConfig, SimulationConfig};
use crate::encounter::{EncounterCoordinator, EncounterError};
use crate::ports::Ports;
use crate::scare::{ScareError, ScareOrchestrator, ScareStatus};

/// Errors that can occur while building the simulation state.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The night clock configuration is invalid.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The repel configuration is invalid.
    #[error("encounter error: {source}")]
    Encounter {
        /// The underlying encounter error.
        #[from]
        source: EncounterError,
    },

    /// The scare configuration is invalid.
    #[error("scare error: {source}")]
    Scare {
        /// The underlying scare error.
        #[from]
        source: ScareError,
    },

    /// An agent spec failed validation.
    #[error("agent `{name}` is invalid: {source}")]
    Agent {
        /// Name of the offending agent spec.
        name: String,
        /// The underlying validation error.
        source: AgentError,
    },

    /// Two agent specs share a name.
    #[error("duplicate agent name: {name}")]
    DuplicateAgentName {
        /// The name that appears more than once.
        name: String,
    },
}

/// Per-tick input from the player and the surrounding loop.
///
/// This is the explicit simulation context: pause state travels with
/// the tick call instead of living in shared global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Simulation seconds to advance.
    pub dt: f32,
    /// The player's world position this tick.
    pub player_position: Vec3,
    /// Whether the player issued the discrete repel action this tick.
    pub repel_pressed: bool,
    /// Whether the simulation is paused this tick.
    pub paused: bool,
}

impl TickInput {
    /// A plain unpaused step with no repel action.
    pub const fn step(dt: f32, player_position: Vec3) -> Self {
        Self {
            dt,
            player_position,
            repel_pressed: false,
            paused: false,
        }
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// The night hour at end of tick.
    pub hour: u8,
    /// Whether this tick was a paused no-op.
    pub paused: bool,
    /// The observable events this tick produced, in order.
    pub events: Vec<SimEvent>,
}

impl TickSummary {
    /// Whether this tick reported the one-shot win.
    pub fn survived(&self) -> bool {
        self.events.contains(&SimEvent::NightSurvived)
    }

    /// Whether this tick finished a jump-scare (the loss is issued).
    pub fn lost(&self) -> bool {
        self.events.contains(&SimEvent::ScareEnded)
    }
}

/// The mutable simulation state passed through the tick cycle.
///
/// Owns the clock, the agent roster, the camera rig, and the scare
/// orchestrator. The camera's resting pose is public so the
/// presentation layer can sync it between ticks.
#[derive(Debug)]
pub struct SimulationState {
    /// The night clock.
    pub clock: NightClock,
    /// The enemy roster.
    pub agents: Vec<EnemyAgent>,
    /// The player camera as seen by the core.
    pub camera: CameraRig,
    /// The jump-scare orchestrator.
    pub scare: ScareOrchestrator,
    /// The repel view-cone filter.
    encounter: EncounterCoordinator,
    /// Hourly escalation deltas.
    escalation: EscalationConfig,
    /// Pause behavior.
    pause: PauseConfig,
    /// Number of ticks executed so far.
    tick: u64,
}

impl SimulationState {
    /// Build the complete simulation state from configuration.
    ///
    /// All validation happens here: clock, repel, and scare tuning plus
    /// every agent spec. A simulation that constructs successfully never
    /// fails at tick time.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] describing the first invalid piece of
    /// configuration encountered.
    pub fn from_config(
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, SimulationError> {
        let clock = NightClock::new(config.night.hour_duration)?;
        let encounter = EncounterCoordinator::new(&config.repel)?;
        let scare = ScareOrchestrator::new(config.scare.clone())?;

        let mut agents = Vec::with_capacity(config.agents.len());
        let mut names: Vec<&str> = Vec::with_capacity(config.agents.len());
        for spec in &config.agents {
            if names.contains(&spec.name.as_str()) {
                return Err(SimulationError::DuplicateAgentName {
                    name: spec.name.clone(),
                });
            }
            names.push(spec.name.as_str());

            let agent =
                EnemyAgent::from_spec(spec, rng).map_err(|source| SimulationError::Agent {
                    name: spec.name.clone(),
                    source,
                })?;
            debug!(
                agent = %agent.name(),
                waypoints = agent.waypoint_count(),
                advance_chance = agent.params().advance_chance,
                "agent spawned"
            );
            agents.push(agent);
        }

        Ok(Self {
            clock,
            agents,
            camera: CameraRig::facing(Vec3::ZERO, 0.0),
            scare,
            encounter,
            escalation: config.night.escalation,
            pause: config.pause,
            tick: 0,
        })
    }

    /// Number of ticks executed so far.
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Push the current hour string to the HUD (called once at startup;
    /// afterwards the tick cycle updates it on each rollover).
    pub fn publish_hour(&self, ports: &mut dyn Ports) {
        ports.set_hour_text(&self.clock.hour_text());
    }
}

/// Execute one complete tick of the simulation.
///
/// This is the main entry point for the loop driver. It runs the phases
/// in sequence and returns a summary of what happened.
pub fn run_tick(
    state: &mut SimulationState,
    input: &TickInput,
    ports: &mut dyn Ports,
    rng: &mut impl Rng,
) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;

    // --- Phase 1: Pause gate ---
    if input.paused {
        if let Some(target) = state.pause.look_at_target {
            state.camera.look_at(target);
        }
        return TickSummary {
            tick,
            hour: state.clock.hour(),
            paused: true,
            events: Vec::new(),
        };
    }

    let mut events = Vec::new();

    // --- Phase 2: Night clock ---
    let clock_tick = state
        .clock
        .tick(input.dt, &mut state.agents, &state.escalation);
    if let Some(hour) = clock_tick.hour_advanced {
        ports.set_hour_text(&state.clock.hour_text());
        events.push(SimEvent::HourAdvanced { hour });
    }
    if clock_tick.night_survived {
        ports.set_locked(false);
        ports.set_visible(true);
        ports.load_scene(SceneId::Win);
        events.push(SimEvent::NightSurvived);
    }

    // --- Phase 3: Scare session ---
    match state
        .scare
        .advance(input.dt, &mut state.camera, ports, rng)
    {
        ScareStatus::Completed => events.push(SimEvent::ScareEnded),
        ScareStatus::Shaking | ScareStatus::Inactive => {}
    }

    // --- Phase 4: Repel action ---
    if input.repel_pressed {
        let repelled = state
            .encounter
            .attempt_repel(&state.camera, &mut state.agents, rng);
        for id in repelled {
            events.push(SimEvent::AgentRepelled { id });
        }
    }

    // --- Phase 5: Agents ---
    let mut attackers = Vec::new();
    for agent in &mut state.agents {
        match agent.tick(input.dt, input.player_position, rng) {
            Some(AgentTickEvent::StartedAdvancing) => {
                events.push(SimEvent::AgentAdvancing { id: agent.id() });
            }
            Some(AgentTickEvent::ReachedAttackRange) => {
                events.push(SimEvent::AttackTriggered { id: agent.id() });
                attackers.push(agent.id());
            }
            None => {}
        }
    }
    for id in attackers {
        if state
            .scare
            .trigger(id, &mut state.agents, input.player_position, ports, rng)
        {
            events.push(SimEvent::ScareStarted { id });
        }
    }

    if !events.is_empty() {
        info!(tick, hour = state.clock.hour(), count = events.len(), "tick events");
    }

    TickSummary {
        tick,
        hour: state.clock.hour(),
        paused: false,
        events,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use vigil_agents::{AgentParams, AgentSpec};
    use vigil_types::AgentPhase;

    use super::*;
    use crate::ports::RecordingPorts;

    fn eager_agent(name: &str, home: Vec3) -> AgentSpec {
        AgentSpec {
            name: name.to_owned(),
            home,
            yaw: 0.0,
            waypoints: Vec::new(),
            params: AgentParams {
                speed: 1.0,
                attack_distance: 1.0,
                advance_chance: 1.0,
                min_wait: 0.0,
                max_wait: 0.0,
                turn_speed: 5.0,
            },
        }
    }

    fn base_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.night.hour_duration = 10.0;
        config
    }

    #[test]
    fn duplicate_agent_names_are_rejected() {
        let mut config = base_config();
        config.agents = vec![
            eager_agent("Twin", Vec3::new(0.0, 0.0, 10.0)),
            eager_agent("Twin", Vec3::new(5.0, 0.0, 10.0)),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            SimulationState::from_config(&config, &mut rng),
            Err(SimulationError::DuplicateAgentName { .. })
        ));
    }

    #[test]
    fn invalid_agent_spec_is_reported_by_name() {
        let mut config = base_config();
        let mut spec = eager_agent("Broken", Vec3::ZERO);
        spec.params.speed = -1.0;
        config.agents = vec![spec];
        let mut rng = SmallRng::seed_from_u64(1);
        let err = SimulationState::from_config(&config, &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::Agent { .. }));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn paused_tick_advances_nothing() {
        let mut config = base_config();
        config.agents = vec![eager_agent("Stalker", Vec3::new(0.0, 0.0, 10.0))];
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
        let mut ports = RecordingPorts::new();

        let remaining_before = state.clock.remaining();
        let pose_before = state.agents.first().unwrap().pose();

        let input = TickInput {
            dt: 1.0,
            player_position: Vec3::ZERO,
            repel_pressed: false,
            paused: true,
        };
        let summary = run_tick(&mut state, &input, &mut ports, &mut rng);

        assert!(summary.paused);
        assert!(summary.events.is_empty());
        assert_relative_eq!(state.clock.remaining(), remaining_before);
        assert_eq!(state.agents.first().unwrap().pose(), pose_before);
    }

    #[test]
    fn paused_tick_reaims_camera_when_configured() {
        let mut config = base_config();
        config.pause.look_at_target = Some(Vec3::new(10.0, 0.0, 0.0));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
        let mut ports = RecordingPorts::new();

        let input = TickInput {
            dt: 1.0,
            player_position: Vec3::ZERO,
            repel_pressed: false,
            paused: true,
        };
        let _ = run_tick(&mut state, &input, &mut ports, &mut rng);

        let aligned = state.camera.forward().dot(Vec3::X);
        assert!(aligned > 0.99);
    }

    #[test]
    fn hour_rollover_updates_hud_and_survives_at_dawn() {
        let mut config = base_config();
        config.night.hour_duration = 1.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
        let mut ports = RecordingPorts::new();
        state.publish_hour(&mut ports);

        let mut survived_ticks: u32 = 0;
        for _ in 0..10 {
            let summary = run_tick(
                &mut state,
                &TickInput::step(1.0, Vec3::ZERO),
                &mut ports,
                &mut rng,
            );
            if summary.survived() {
                survived_ticks = survived_ticks.saturating_add(1);
            }
        }

        assert_eq!(survived_ticks, 1);
        assert_eq!(
            ports.hour_texts,
            vec![
                String::from("12 : 00 AM"),
                String::from("1 : 00 AM"),
                String::from("2 : 00 AM"),
                String::from("3 : 00 AM"),
                String::from("4 : 00 AM"),
                String::from("5 : 00 AM"),
                String::from("6 : 00 AM"),
            ]
        );
        assert_eq!(ports.scenes, vec![SceneId::Win]);
        assert_eq!(ports.cursor_locks, vec![false]);
    }

    #[test]
    fn eager_agent_is_caught_end_to_end() {
        // Spec shape: no waypoints, zero wait window, certain advance.
        let mut config = base_config();
        config.agents = vec![eager_agent("Stalker", Vec3::new(0.0, 0.0, 10.0))];
        config.scare.shake_duration = 0.5;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
        let mut ports = RecordingPorts::new();

        let mut all_events = Vec::new();
        for _ in 0..200 {
            let summary = run_tick(
                &mut state,
                &TickInput::step(0.1, Vec3::ZERO),
                &mut ports,
                &mut rng,
            );
            all_events.extend(summary.events.clone());
            if summary.lost() {
                break;
            }
        }

        let id = state.agents.first().unwrap().id();
        assert!(all_events.contains(&SimEvent::AgentAdvancing { id }));
        assert!(all_events.contains(&SimEvent::AttackTriggered { id }));
        assert!(all_events.contains(&SimEvent::ScareStarted { id }));
        assert!(all_events.contains(&SimEvent::ScareEnded));
        // Exactly one loss transition and one audio cue.
        assert_eq!(ports.scenes, vec![SceneId::Lose]);
        assert_eq!(ports.cues.len(), 1);
    }

    #[test]
    fn repel_press_resets_agents_in_view() {
        let mut config = base_config();
        // A non-zero wait window keeps the agent idle for the rest of
        // the tick after the repel lands.
        let mut spec = eager_agent("Ahead", Vec3::new(0.0, 0.0, 10.0));
        spec.params.min_wait = 1.0;
        spec.params.max_wait = 1.0;
        config.agents = vec![spec];
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
        let mut ports = RecordingPorts::new();

        // Let the agent advance and move for a while.
        for _ in 0..20 {
            let _ = run_tick(
                &mut state,
                &TickInput::step(0.1, Vec3::ZERO),
                &mut ports,
                &mut rng,
            );
        }
        assert!(state.agents.first().unwrap().phase().is_advancing());

        let input = TickInput {
            dt: 0.1,
            player_position: Vec3::ZERO,
            repel_pressed: true,
            paused: false,
        };
        let summary = run_tick(&mut state, &input, &mut ports, &mut rng);

        let id = state.agents.first().unwrap().id();
        assert!(summary.events.contains(&SimEvent::AgentRepelled { id }));
        // Repel lands before the agent phase, so the agent is idle at the
        // end of the tick (its fresh wait timer has barely counted down).
        assert_eq!(state.agents.first().unwrap().phase(), AgentPhase::Idle);
    }

    #[test]
    fn same_seed_replays_the_same_event_stream() {
        let run = |seed: u64| {
            let mut config = base_config();
            config.night.hour_duration = 2.0;
            config.agents = vec![
                eager_agent("One", Vec3::new(0.0, 0.0, 12.0)),
                eager_agent("Two", Vec3::new(6.0, 0.0, 8.0)),
            ];
            config.scare.shake_duration = 0.5;
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut state = SimulationState::from_config(&config, &mut rng).unwrap();
            let mut ports = RecordingPorts::new();

            let mut kinds = Vec::new();
            for _ in 0..100 {
                let summary = run_tick(
                    &mut state,
                    &TickInput::step(0.1, Vec3::ZERO),
                    &mut ports,
                    &mut rng,
                );
                kinds.extend(
                    summary
                        .events
                        .iter()
                        .map(|event| format!("{event:?}"))
                        .map(|s| s.split_whitespace().next().unwrap_or_default().to_owned()),
                );
            }
            kinds
        };

        assert_eq!(run(9), run(9));
    }
}
