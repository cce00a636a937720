//! The enemy agent state machine.
//!
//! Each agent cycles through four phases. While [`AgentPhase::Idle`] it
//! counts down a randomized wait timer; on expiry it rolls against its
//! `advance_chance` and either starts moving or re-arms the timer. While
//! moving it walks its waypoint path ([`AgentPhase::FollowingPath`]) and
//! then heads straight for the player ([`AgentPhase::DirectChase`]),
//! smoothly tracking the player with its facing the whole way. Reaching
//! attack range transitions to [`AgentPhase::Attacking`], which is
//! terminal for the encounter: the agent freezes until repelled.
//!
//! All randomness is drawn from an injected [`Rng`], so a seeded generator
//! replays an agent's decisions exactly.

use glam::Vec3;
use rand::Rng;
use tracing::debug;
use vigil_types::pose::move_towards;
use vigil_types::{AgentId, AgentPhase, Pose};

use crate::config::AgentSpec;
use crate::error::AgentError;

/// Distance at which a waypoint counts as reached.
pub const WAYPOINT_EPSILON: f32 = 0.1;

/// Event reported by a single agent tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTickEvent {
    /// The agent won its advance roll and left the idle phase.
    StartedAdvancing,
    /// The agent closed to attack range of the player.
    ReachedAttackRange,
}

/// One enemy, owned by the simulation state and mutated every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAgent {
    /// Stable identity, used in events and logs.
    id: AgentId,
    /// Display name.
    name: String,
    /// The pose the agent spawns at and is repelled back to.
    home: Pose,
    /// Current pose.
    pose: Pose,
    /// Scripted approach path; may be empty.
    waypoints: Vec<Vec3>,
    /// Behavior tuning (mutated by hourly escalation).
    params: crate::config::AgentParams,
    /// Current behavioral phase.
    phase: AgentPhase,
    /// Seconds until the next advance attempt (meaningful while idle).
    wait_timer: f32,
    /// Index of the waypoint currently being walked toward.
    waypoint_index: usize,
}

impl EnemyAgent {
    /// Build an agent from its spawn spec, validating every parameter.
    ///
    /// Validation happens here and nowhere else: tick-time code assumes
    /// the invariants this constructor establishes. The initial wait
    /// timer is drawn from the agent's wait window.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] when the name is empty, a parameter is
    /// non-finite or out of range, the wait window is inverted, or a
    /// waypoint coordinate is not finite.
    pub fn from_spec(spec: &AgentSpec, rng: &mut impl Rng) -> Result<Self, AgentError> {
        validate_spec(spec)?;

        let home = Pose::new(spec.home, spec.yaw);
        let mut agent = Self {
            id: AgentId::new(),
            name: spec.name.clone(),
            home,
            pose: home,
            waypoints: spec.waypoints.clone(),
            params: spec.params,
            phase: AgentPhase::Idle,
            wait_timer: 0.0,
            waypoint_index: 0,
        };
        agent.reset_timer(rng);
        Ok(agent)
    }

    /// Advance the agent by one simulation step.
    ///
    /// Returns the event this tick produced, if any. The caller feeds
    /// [`AgentTickEvent::ReachedAttackRange`] to the scare orchestrator.
    pub fn tick(
        &mut self,
        dt: f32,
        player_position: Vec3,
        rng: &mut impl Rng,
    ) -> Option<AgentTickEvent> {
        match self.phase {
            AgentPhase::Idle => self.tick_idle(dt, rng),
            AgentPhase::FollowingPath => {
                self.tick_path(dt, player_position);
                None
            }
            AgentPhase::DirectChase => self.tick_chase(dt, player_position),
            // Terminal until repelled; the scare orchestrator owns the
            // agent's pose from here.
            AgentPhase::Attacking => None,
        }
    }

    /// Send the agent home: idle phase, home pose, path restarted, wait
    /// timer re-armed. Always succeeds; repelling an idle agent is a
    /// harmless reset.
    pub fn repel(&mut self, rng: &mut impl Rng) {
        debug!(agent = %self.name, "repelled to home pose");
        self.phase = AgentPhase::Idle;
        self.pose = self.home;
        self.waypoint_index = 0;
        self.reset_timer(rng);
    }

    /// Apply one hour of difficulty escalation.
    ///
    /// `advance_delta` is added to the advance chance and clamped back to
    /// `[0, 1]`; `speed_delta` is added to the speed, floored at zero.
    pub fn escalate(&mut self, advance_delta: f32, speed_delta: f32) {
        self.params.advance_chance = (self.params.advance_chance + advance_delta).clamp(0.0, 1.0);
        self.params.speed = (self.params.speed + speed_delta).max(0.0);
        debug!(
            agent = %self.name,
            advance_chance = self.params.advance_chance,
            speed = self.params.speed,
            "difficulty escalated"
        );
    }

    /// Snap the agent's facing straight at a point (used when the scare
    /// orchestrator relocates the attacker in front of the player).
    pub fn face(&mut self, point: Vec3) {
        self.pose.face(point);
    }

    /// Teleport the agent to a world position, keeping its facing.
    pub fn relocate(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    /// Stable identity.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current behavioral phase.
    pub const fn phase(&self) -> AgentPhase {
        self.phase
    }

    /// Current pose.
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    /// The home pose the agent is repelled back to.
    pub const fn home(&self) -> Pose {
        self.home
    }

    /// Current behavior parameters.
    pub const fn params(&self) -> crate::config::AgentParams {
        self.params
    }

    /// Seconds remaining until the next advance attempt.
    pub const fn wait_timer(&self) -> f32 {
        self.wait_timer
    }

    /// Index of the waypoint currently being walked toward. Always in
    /// `[0, waypoint_count]`.
    pub const fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    /// Number of waypoints on the scripted path.
    pub const fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Idle phase: count down, then roll for an advance.
    fn tick_idle(&mut self, dt: f32, rng: &mut impl Rng) -> Option<AgentTickEvent> {
        self.wait_timer -= dt;
        if self.wait_timer > 0.0 {
            return None;
        }

        let roll: f32 = rng.random();
        if roll <= self.params.advance_chance {
            self.phase = if self.waypoints.is_empty() {
                AgentPhase::DirectChase
            } else {
                AgentPhase::FollowingPath
            };
            debug!(
                agent = %self.name,
                roll,
                chance = self.params.advance_chance,
                phase = ?self.phase,
                "advance roll won, agent begins advancing"
            );
            Some(AgentTickEvent::StartedAdvancing)
        } else {
            debug!(
                agent = %self.name,
                roll,
                chance = self.params.advance_chance,
                "advance roll lost, agent stays put"
            );
            self.reset_timer(rng);
            None
        }
    }

    /// Path phase: walk the waypoint list while tracking the player.
    fn tick_path(&mut self, dt: f32, player_position: Vec3) {
        self.pose
            .turn_toward(player_position, self.params.turn_speed * dt);

        let Some(&target) = self.waypoints.get(self.waypoint_index) else {
            // Past the final waypoint (or path shorter than the index
            // says, which repel prevents): head straight for the player.
            self.phase = AgentPhase::DirectChase;
            return;
        };

        self.pose.position = move_towards(self.pose.position, target, self.params.speed * dt);

        if self.pose.distance_to(target) < WAYPOINT_EPSILON {
            self.waypoint_index = self.waypoint_index.saturating_add(1);
            if self.waypoint_index >= self.waypoints.len() {
                self.phase = AgentPhase::DirectChase;
            }
        }
    }

    /// Chase phase: head straight at the player, attack in range.
    fn tick_chase(&mut self, dt: f32, player_position: Vec3) -> Option<AgentTickEvent> {
        self.pose
            .turn_toward(player_position, self.params.turn_speed * dt);
        self.pose.position = move_towards(
            self.pose.position,
            player_position,
            self.params.speed * dt,
        );

        if self.pose.distance_to(player_position) <= self.params.attack_distance {
            self.phase = AgentPhase::Attacking;
            debug!(agent = %self.name, "reached attack range");
            Some(AgentTickEvent::ReachedAttackRange)
        } else {
            None
        }
    }

    /// Re-arm the wait timer with a uniform draw from the wait window.
    fn reset_timer(&mut self, rng: &mut impl Rng) {
        self.wait_timer = rng.random_range(self.params.min_wait..=self.params.max_wait);
    }
}

/// Validate a spawn spec before any agent state is built from it.
fn validate_spec(spec: &AgentSpec) -> Result<(), AgentError> {
    if spec.name.trim().is_empty() {
        return Err(AgentError::EmptyName);
    }

    let p = spec.params;
    require_finite("speed", p.speed)?;
    require_finite("attack_distance", p.attack_distance)?;
    require_finite("advance_chance", p.advance_chance)?;
    require_finite("min_wait", p.min_wait)?;
    require_finite("max_wait", p.max_wait)?;
    require_finite("turn_speed", p.turn_speed)?;
    if !spec.home.is_finite() {
        return Err(AgentError::NonFinite { field: "home" });
    }
    if !spec.yaw.is_finite() {
        return Err(AgentError::NonFinite { field: "yaw" });
    }

    if p.speed <= 0.0 {
        return Err(AgentError::NotPositive {
            field: "speed",
            value: p.speed,
        });
    }
    if p.turn_speed <= 0.0 {
        return Err(AgentError::NotPositive {
            field: "turn_speed",
            value: p.turn_speed,
        });
    }
    if p.attack_distance < 0.0 {
        return Err(AgentError::Negative {
            field: "attack_distance",
            value: p.attack_distance,
        });
    }
    if !(0.0..=1.0).contains(&p.advance_chance) {
        return Err(AgentError::OutOfRange {
            field: "advance_chance",
            value: p.advance_chance,
            min: 0.0,
            max: 1.0,
        });
    }
    if p.min_wait < 0.0 {
        return Err(AgentError::Negative {
            field: "min_wait",
            value: p.min_wait,
        });
    }
    if p.max_wait < p.min_wait {
        return Err(AgentError::InvalidWaitWindow {
            min: p.min_wait,
            max: p.max_wait,
        });
    }

    for (index, waypoint) in spec.waypoints.iter().enumerate() {
        if !waypoint.is_finite() {
            return Err(AgentError::NonFiniteWaypoint { index });
        }
    }

    Ok(())
}

fn require_finite(field: &'static str, value: f32) -> Result<(), AgentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AgentError::NonFinite { field })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::AgentParams;

    /// An agent that advances on the first tick: empty path, zero wait,
    /// certain advance roll.
    fn eager_spec() -> AgentSpec {
        AgentSpec {
            name: String::from("Stalker"),
            home: Vec3::new(0.0, 0.0, 10.0),
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

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn spec_with_defaults_builds() {
        let spec = AgentSpec {
            name: String::from("Groundskeeper"),
            home: Vec3::ZERO,
            yaw: 0.0,
            waypoints: Vec::new(),
            params: AgentParams::default(),
        };
        let agent = EnemyAgent::from_spec(&spec, &mut rng()).unwrap();
        assert_eq!(agent.phase(), AgentPhase::Idle);
        assert!(agent.wait_timer() >= 3.0 && agent.wait_timer() <= 7.0);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut r = rng();

        let mut spec = eager_spec();
        spec.name = String::from("  ");
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::EmptyName)
        ));

        let mut spec = eager_spec();
        spec.params.speed = 0.0;
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::NotPositive { field: "speed", .. })
        ));

        let mut spec = eager_spec();
        spec.params.advance_chance = 1.5;
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::OutOfRange {
                field: "advance_chance",
                ..
            })
        ));

        let mut spec = eager_spec();
        spec.params.min_wait = 5.0;
        spec.params.max_wait = 2.0;
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::InvalidWaitWindow { .. })
        ));

        let mut spec = eager_spec();
        spec.params.attack_distance = f32::NAN;
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::NonFinite {
                field: "attack_distance"
            })
        ));

        let mut spec = eager_spec();
        spec.waypoints = vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)];
        assert!(matches!(
            EnemyAgent::from_spec(&spec, &mut r),
            Err(AgentError::NonFiniteWaypoint { index: 1 })
        ));
    }

    #[test]
    fn eager_agent_chases_directly_on_first_tick() {
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&eager_spec(), &mut r).unwrap();

        let event = agent.tick(0.1, Vec3::ZERO, &mut r);
        assert_eq!(event, Some(AgentTickEvent::StartedAdvancing));
        assert_eq!(agent.phase(), AgentPhase::DirectChase);
    }

    #[test]
    fn chase_reaches_attack_range_and_freezes() {
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&eager_spec(), &mut r).unwrap();
        let player = Vec3::ZERO;

        let mut attack_seen: u32 = 0;
        for _ in 0..60 {
            if agent.tick(0.5, player, &mut r) == Some(AgentTickEvent::ReachedAttackRange) {
                attack_seen = attack_seen.saturating_add(1);
            }
        }
        assert_eq!(attack_seen, 1);
        assert_eq!(agent.phase(), AgentPhase::Attacking);
        // Frozen at attack range until repelled, not standing on the player.
        assert!(agent.pose().distance_to(player) <= 1.0);
        let frozen = agent.pose();
        let _ = agent.tick(0.5, player, &mut r);
        assert_eq!(agent.pose(), frozen);
    }

    #[test]
    fn path_is_walked_in_order_then_chase_begins() {
        let mut spec = eager_spec();
        spec.waypoints = vec![Vec3::new(0.0, 0.0, 5.0), Vec3::new(2.0, 0.0, 3.0)];
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&spec, &mut r).unwrap();
        let player = Vec3::ZERO;

        let event = agent.tick(0.1, player, &mut r);
        assert_eq!(event, Some(AgentTickEvent::StartedAdvancing));
        assert_eq!(agent.phase(), AgentPhase::FollowingPath);

        let mut last_index = agent.waypoint_index();
        for _ in 0..400 {
            let _ = agent.tick(0.05, player, &mut r);
            // Index invariant holds on every tick and never goes back.
            assert!(agent.waypoint_index() <= agent.waypoint_count());
            assert!(agent.waypoint_index() >= last_index);
            last_index = agent.waypoint_index();
            if agent.phase() == AgentPhase::Attacking {
                break;
            }
        }

        assert_eq!(agent.phase(), AgentPhase::Attacking);
        assert_eq!(last_index, 2);
    }

    #[test]
    fn lost_roll_rearms_the_wait_timer() {
        let mut spec = eager_spec();
        spec.params.advance_chance = 0.0;
        spec.params.min_wait = 2.0;
        spec.params.max_wait = 2.0;
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&spec, &mut r).unwrap();

        // Run the timer down; the roll loses (chance 0 and a nonzero roll)
        // and the timer is re-armed to the fixed window.
        let _ = agent.tick(2.5, Vec3::ZERO, &mut r);
        assert_eq!(agent.phase(), AgentPhase::Idle);
        assert_relative_eq!(agent.wait_timer(), 2.0);
    }

    #[test]
    fn repel_is_idempotent_and_restores_home() {
        let mut spec = eager_spec();
        spec.waypoints = vec![Vec3::new(0.0, 0.0, 5.0)];
        spec.params.min_wait = 4.0;
        spec.params.max_wait = 4.0;
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&spec, &mut r).unwrap();

        // Advance into the path and move a while.
        let _ = agent.tick(5.0, Vec3::ZERO, &mut r);
        for _ in 0..10 {
            let _ = agent.tick(0.2, Vec3::ZERO, &mut r);
        }
        assert!(agent.phase().is_advancing());

        agent.repel(&mut r);
        let once = (
            agent.pose(),
            agent.phase(),
            agent.waypoint_index(),
            agent.wait_timer(),
        );
        assert_eq!(once.0, agent.home());
        assert_eq!(once.1, AgentPhase::Idle);
        assert_eq!(once.2, 0);
        assert_relative_eq!(once.3, 4.0);

        // A second repel changes nothing (fixed wait window makes the
        // re-draw observable as equality).
        agent.repel(&mut r);
        assert_eq!(agent.pose(), once.0);
        assert_eq!(agent.phase(), once.1);
        assert_eq!(agent.waypoint_index(), once.2);
        assert_relative_eq!(agent.wait_timer(), once.3);
    }

    #[test]
    fn escalation_is_monotonic_and_clamped() {
        let mut spec = eager_spec();
        spec.params.advance_chance = 0.25;
        spec.params.speed = 2.0;
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&spec, &mut r).unwrap();

        for _ in 0..6 {
            agent.escalate(0.10, 0.5);
        }
        assert_relative_eq!(agent.params().advance_chance, 0.85, epsilon = 1e-6);
        assert_relative_eq!(agent.params().speed, 5.0, epsilon = 1e-6);

        // Two more hours would exceed 1.0; the chance clamps there.
        for _ in 0..2 {
            agent.escalate(0.10, 0.5);
        }
        assert_relative_eq!(agent.params().advance_chance, 1.0);
    }

    #[test]
    fn advance_chance_invariant_survives_arbitrary_escalation() {
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&eager_spec(), &mut r).unwrap();

        agent.escalate(10.0, 0.0);
        assert_relative_eq!(agent.params().advance_chance, 1.0);
        agent.escalate(-10.0, 0.0);
        assert_relative_eq!(agent.params().advance_chance, 0.0);
        agent.escalate(0.0, -99.0);
        assert_relative_eq!(agent.params().speed, 0.0);
    }

    #[test]
    fn facing_tracks_player_smoothly() {
        let mut r = rng();
        let mut agent = EnemyAgent::from_spec(&eager_spec(), &mut r).unwrap();
        let player = Vec3::ZERO;

        // Enter the chase, then take one small step: the bearing to the
        // player is PI away from the home facing, and one tick only turns
        // turn_speed * dt radians.
        let _ = agent.tick(0.01, player, &mut r);
        let _ = agent.tick(0.01, player, &mut r);
        let yaw = agent.pose().yaw.abs();
        assert!(yaw > 0.0 && yaw < core::f32::consts::PI / 2.0);
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut spec = eager_spec();
        spec.params.advance_chance = 0.4;
        spec.params.min_wait = 0.5;
        spec.params.max_wait = 2.0;
        let player = Vec3::new(1.0, 0.0, -3.0);

        let mut run = |seed: u64| {
            let mut r = SmallRng::seed_from_u64(seed);
            let mut agent = EnemyAgent::from_spec(&spec, &mut r).unwrap();
            for _ in 0..300 {
                let _ = agent.tick(0.1, player, &mut r);
            }
            (agent.pose(), agent.phase(), agent.waypoint_index())
        };

        assert_eq!(run(42), run(42));
    }
}
