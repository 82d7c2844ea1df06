//! Spawn director
//!
//! Decides when and where agents enter the field during a wave. Later
//! waves raise the live-agent cap, shorten the spawn interval and roll
//! faster, tougher agents. Unless waves are endless, a wave also stops
//! spawning once it has sent its quota, which is what lets it be cleared.

use glam::Vec2;
use rand::Rng;

use super::state::Phase;
use crate::tuning::Tuning;

/// Attributes of an agent about to enter the field
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub pos: Vec2,
    pub speed: f32,
    pub health: f32,
}

/// Field edge an agent enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

#[derive(Debug, Clone, Default)]
pub struct SpawnDirector {
    /// Seconds since the last spawn (or since the wave started)
    pub accumulator: f32,
    /// Agents sent so far this wave
    pub spawned: usize,
}

impl SpawnDirector {
    /// Start counting from zero, at the beginning of a wave
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.spawned = 0;
    }

    /// Advance the spawn timer and roll a new agent if one is due.
    ///
    /// The timer only runs while attacking. Nothing spawns while
    /// `live_agents` is at the wave's cap or the wave quota is spent.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        dt: f32,
        wave: u32,
        phase: Phase,
        live_agents: usize,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<NewAgent> {
        if phase != Phase::Attacking {
            return None;
        }
        self.accumulator += dt;

        if live_agents >= tuning.spawn_cap(wave) {
            return None;
        }
        if tuning.wave_quota(wave).is_some_and(|quota| self.spawned >= quota) {
            return None;
        }
        if self.accumulator < tuning.spawn_interval(wave) {
            return None;
        }
        self.accumulator = 0.0;
        self.spawned += 1;

        let pos = spawn_position(tuning, rng);
        let speed = sample_between(rng, tuning.agent_speed_min, tuning.agent_speed_max)
            + tuning.agent_speed_bonus(wave);
        let health = tuning.agent_health(wave);

        Some(NewAgent { pos, speed, health })
    }
}

/// Pick a point just outside one of the four field edges
pub fn spawn_position<R: Rng>(tuning: &Tuning, rng: &mut R) -> Vec2 {
    let margin = tuning.spawn_margin;
    let w = tuning.field_width;
    let h = tuning.field_height;

    match Edge::ALL[rng.random_range(0..Edge::ALL.len())] {
        Edge::Top => Vec2::new(sample_between(rng, -margin, w + margin), -margin),
        Edge::Right => Vec2::new(w + margin, sample_between(rng, -margin, h + margin)),
        Edge::Bottom => Vec2::new(sample_between(rng, -margin, w + margin), h + margin),
        Edge::Left => Vec2::new(-margin, sample_between(rng, -margin, h + margin)),
    }
}

/// Uniform in `[low, high)`, or `low` when the range is empty or not a number
fn sample_between<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}
