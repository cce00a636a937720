//! The night clock: hour progression and hourly difficulty escalation.
//!
//! The night runs from hour 0 (midnight) to [`FINAL_HOUR`] (6 AM). Each
//! time `hour_duration` seconds of simulation time elapse, the clock
//! rolls over to the next hour and escalates every agent's difficulty
//! parameters by the configured deltas. Reaching 6 AM reports the win
//! exactly once; the clock is inert afterwards.
//!
//! The clock holds no references to the agents -- the caller passes the
//! agent slice into [`NightClock::tick`], so a single authority mutates
//! the collection per tick.

use vigil_agents::EnemyAgent;

use crate::config::EscalationConfig;

/// The hour at which the night is survived (6 AM).
pub const FINAL_HOUR: u8 = 6;

/// Errors that can occur during clock construction.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid clock configuration (e.g. non-positive hour duration).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Result of a single clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTick {
    /// The hour just reached, when this tick rolled over an hour.
    pub hour_advanced: Option<u8>,
    /// True exactly once, on the tick that reaches 6 AM.
    pub night_survived: bool,
}

/// Global phase clock for the night timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct NightClock {
    /// Seconds of simulation time per in-game hour.
    hour_duration: f32,
    /// Seconds remaining in the current hour.
    remaining: f32,
    /// Current hour, `0..=6` (0 = midnight, 6 = dawn).
    hour: u8,
    /// Whether the one-shot win signal has already been reported.
    win_reported: bool,
}

impl NightClock {
    /// Create a clock at midnight with the given hour duration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `hour_duration` is not
    /// finite and positive.
    pub fn new(hour_duration: f32) -> Result<Self, ClockError> {
        if !hour_duration.is_finite() || hour_duration <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: format!("hour_duration must be finite and positive, got {hour_duration}"),
            });
        }
        Ok(Self {
            hour_duration,
            remaining: hour_duration,
            hour: 0,
            win_reported: false,
        })
    }

    /// Create a clock from explicit parts (useful for testing and state
    /// restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `hour_duration` is not
    /// finite and positive or `hour` exceeds [`FINAL_HOUR`].
    pub fn from_parts(hour_duration: f32, remaining: f32, hour: u8) -> Result<Self, ClockError> {
        if !hour_duration.is_finite() || hour_duration <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: format!("hour_duration must be finite and positive, got {hour_duration}"),
            });
        }
        if hour > FINAL_HOUR {
            return Err(ClockError::InvalidConfig {
                reason: format!("hour {hour} exceeds final hour {FINAL_HOUR}"),
            });
        }
        Ok(Self {
            hour_duration,
            remaining,
            hour,
            win_reported: hour >= FINAL_HOUR,
        })
    }

    /// Advance the clock by one simulation step.
    ///
    /// On an hour rollover every agent is escalated by the configured
    /// deltas. The tick that reaches 6 AM additionally reports
    /// `night_survived`; every later tick is a no-op.
    pub fn tick(
        &mut self,
        dt: f32,
        agents: &mut [EnemyAgent],
        escalation: &EscalationConfig,
    ) -> ClockTick {
        if self.hour >= FINAL_HOUR {
            return ClockTick::default();
        }

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return ClockTick::default();
        }

        self.hour = self.hour.saturating_add(1);
        self.remaining = self.hour_duration;

        for agent in &mut *agents {
            agent.escalate(escalation.advance_chance_delta, escalation.speed_delta);
        }
        tracing::info!(
            hour = self.hour,
            hour_text = %self.hour_text(),
            agents = agents.len(),
            "hour advanced, difficulty escalated"
        );

        let night_survived = if self.hour >= FINAL_HOUR && !self.win_reported {
            self.win_reported = true;
            tracing::info!("dawn reached, night survived");
            true
        } else {
            false
        };

        ClockTick {
            hour_advanced: Some(self.hour),
            night_survived,
        }
    }

    /// Current hour, `0..=6`.
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Seconds remaining in the current hour.
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the night has been survived (hour is 6 AM).
    pub const fn is_dawn(&self) -> bool {
        self.hour >= FINAL_HOUR
    }

    /// The display string for the current hour on a 12-hour clock.
    ///
    /// Hour 0 is `"12 : 00 AM"`, hour 3 is `"3 : 00 AM"`.
    pub fn hour_text(&self) -> String {
        let raw = 12u8.saturating_add(self.hour);
        let display = if raw > 12 { raw.saturating_sub(12) } else { raw };
        format!("{display} : 00 AM")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use vigil_agents::{AgentParams, AgentSpec};

    use super::*;

    fn make_agents(count: usize) -> Vec<EnemyAgent> {
        let mut rng = SmallRng::seed_from_u64(3);
        (0..count)
            .map(|i| {
                let spec = AgentSpec {
                    name: format!("Agent {i}"),
                    home: Vec3::new(0.0, 0.0, 10.0),
                    yaw: 0.0,
                    waypoints: Vec::new(),
                    params: AgentParams::default(),
                };
                EnemyAgent::from_spec(&spec, &mut rng).unwrap()
            })
            .collect()
    }

    const ESCALATION: EscalationConfig = EscalationConfig {
        advance_chance_delta: 0.10,
        speed_delta: 0.5,
    };

    #[test]
    fn rejects_non_positive_hour_duration() {
        assert!(NightClock::new(0.0).is_err());
        assert!(NightClock::new(-5.0).is_err());
        assert!(NightClock::new(f32::NAN).is_err());
        assert!(NightClock::new(45.0).is_ok());
    }

    #[test]
    fn hour_advances_when_duration_elapses() {
        let mut clock = NightClock::new(10.0).unwrap();
        let mut agents = make_agents(1);

        // Partial ticks accumulate.
        for _ in 0..9 {
            let tick = clock.tick(1.0, &mut agents, &ESCALATION);
            assert_eq!(tick.hour_advanced, None);
        }
        let tick = clock.tick(1.0, &mut agents, &ESCALATION);
        assert_eq!(tick.hour_advanced, Some(1));
        assert_eq!(clock.hour(), 1);
        assert!(!tick.night_survived);
    }

    #[test]
    fn each_hour_escalates_every_agent() {
        let mut clock = NightClock::new(1.0).unwrap();
        let mut agents = make_agents(3);

        let _ = clock.tick(1.0, &mut agents, &ESCALATION);
        for agent in &agents {
            assert_relative_eq!(agent.params().advance_chance, 0.35, epsilon = 1e-6);
            assert_relative_eq!(agent.params().speed, 2.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn full_night_escalation_totals() {
        let mut clock = NightClock::new(1.0).unwrap();
        let mut agents = make_agents(1);

        for _ in 0..6 {
            let _ = clock.tick(1.0, &mut agents, &ESCALATION);
        }
        let agent = agents.first().unwrap();
        // clamp01(0.25 + 6 * 0.10) and 2.0 + 6 * 0.5.
        assert_relative_eq!(agent.params().advance_chance, 0.85, epsilon = 1e-6);
        assert_relative_eq!(agent.params().speed, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn win_is_reported_exactly_once_and_hour_never_decrements() {
        let mut clock = NightClock::new(1.0).unwrap();
        let mut agents = make_agents(1);

        let mut wins: u32 = 0;
        for _ in 0..20 {
            let tick = clock.tick(1.0, &mut agents, &ESCALATION);
            if tick.night_survived {
                wins = wins.saturating_add(1);
            }
            assert!(clock.hour() <= FINAL_HOUR);
        }
        assert_eq!(wins, 1);
        assert_eq!(clock.hour(), FINAL_HOUR);
        assert!(clock.is_dawn());

        // Inert after dawn: no more escalation either.
        let before = agents.first().unwrap().params();
        let tick = clock.tick(100.0, &mut agents, &ESCALATION);
        assert_eq!(tick, ClockTick::default());
        let after = agents.first().unwrap().params();
        assert_relative_eq!(before.advance_chance, after.advance_chance);
        assert_relative_eq!(before.speed, after.speed);
    }

    #[test]
    fn hour_text_wraps_to_twelve_hour_clock() {
        let clock = NightClock::new(45.0).unwrap();
        assert_eq!(clock.hour_text(), "12 : 00 AM");

        let clock = NightClock::from_parts(45.0, 45.0, 1).unwrap();
        assert_eq!(clock.hour_text(), "1 : 00 AM");

        let clock = NightClock::from_parts(45.0, 45.0, 3).unwrap();
        assert_eq!(clock.hour_text(), "3 : 00 AM");

        let clock = NightClock::from_parts(45.0, 45.0, 6).unwrap();
        assert_eq!(clock.hour_text(), "6 : 00 AM");
    }

    #[test]
    fn from_parts_rejects_hour_past_dawn() {
        assert!(NightClock::from_parts(45.0, 45.0, 7).is_err());
    }

    #[test]
    fn restored_dawn_clock_does_not_rereport_win() {
        let mut clock = NightClock::from_parts(45.0, 0.0, 6).unwrap();
        let mut agents = make_agents(1);
        let tick = clock.tick(1.0, &mut agents, &ESCALATION);
        assert!(!tick.night_survived);
    }
}
