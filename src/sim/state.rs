//! Game state and core simulation types
//!
//! Everything the per-frame update reads or writes lives on [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combat::Turret;
use super::spawn::SpawnDirector;
use super::store::EntityStore;
use crate::tuning::Tuning;

/// Entity identifier, unique for the lifetime of a [`GameState`]
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Placement allowed, no agents spawn, turret idle
    Building,
    /// A wave is running: agents spawn and the turret fires
    Attacking,
    /// The objective fell. Nothing spawns or fires until reset
    Defeated,
}

/// The defended core at the centre of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Objective {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.objective_position(),
            radius: tuning.objective_radius,
            health: tuning.objective_max_health,
            max_health: tuning.objective_max_health,
        }
    }

    /// Reduce health, never below zero
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// A player-built barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Obstacle {
    /// Remaining health in 0..=1 (for health rings)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// A hostile agent walking toward the objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileAgent {
    pub id: EntityId,
    pub pos: Vec2,
    /// Recomputed every frame from `speed` and the heading to the objective
    pub vel: Vec2,
    pub health: f32,
    pub speed: f32,
}

impl HostileAgent {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// A turret shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds of flight left
    pub ttl: f32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

/// Things that happened during a step, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstaclePlaced { id: EntityId, pos: Vec2 },
    AttackStarted { wave: u32 },
    AgentSpawned { id: EntityId, pos: Vec2 },
    ShotFired { id: EntityId, target: EntityId },
    ProjectileHit { projectile: EntityId, agent: EntityId },
    AgentKilled { id: EntityId, pos: Vec2 },
    ObstacleDestroyed { id: EntityId, pos: Vec2 },
    WaveCleared { wave: u32, gold: u32, score: u64 },
    ObjectiveFallen { wave: u32 },
    Reset,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table
    pub tuning: Tuning,
    /// Current phase
    pub phase: Phase,
    /// Waves started so far (0 before the first attack)
    pub wave: u32,
    /// Spendable currency
    pub gold: u32,
    /// Score (only ever grows until reset)
    pub score: u64,
    /// Simulated seconds since the session started
    pub time: f64,
    pub objective: Objective,
    /// Live obstacles, agents and projectiles
    pub store: EntityStore,
    pub spawner: SpawnDirector,
    pub turret: Turret,
    /// Events since the last `drain_events`
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: Phase::Building,
            wave: 0,
            gold: tuning.starting_gold,
            score: 0,
            time: 0.0,
            objective: Objective::new(&tuning),
            store: EntityStore::default(),
            spawner: SpawnDirector::default(),
            turret: Turret::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a start-attack command would be accepted right now
    pub fn can_start_attack(&self) -> bool {
        self.phase == Phase::Building && !self.objective.is_destroyed()
    }
}
