//! Wave lifecycle and player commands
//!
//! Building --start--> Attacking --cleared--> Building
//!                         |
//!                         +--objective falls--> Defeated --reset--> Building

use std::fmt;

use glam::Vec2;

use super::collision::discs_overlap;
use super::state::{EntityId, GameEvent, GameState, Objective, Phase};
use crate::{length, subtract};

/// Why an obstacle could not be placed
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementRejection {
    /// Building is only allowed between waves
    WrongPhase(Phase),
    InsufficientGold { have: u32, need: u32 },
    /// Not a finite point inside the field
    OutsideField,
    /// Inside the exclusion ring around the objective
    TooCloseToObjective,
    /// Footprint (plus margin) touches an existing obstacle
    OverlapsObstacle(EntityId),
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::WrongPhase(phase) => {
                write!(f, "cannot build during {:?}", phase)
            }
            PlacementRejection::InsufficientGold { have, need } => {
                write!(f, "not enough gold ({} of {})", have, need)
            }
            PlacementRejection::OutsideField => write!(f, "outside the field"),
            PlacementRejection::TooCloseToObjective => write!(f, "too close to the core"),
            PlacementRejection::OverlapsObstacle(id) => {
                write!(f, "overlaps obstacle {}", id)
            }
        }
    }
}

impl std::error::Error for PlacementRejection {}

impl GameState {
    /// Try to build an obstacle at `pos` (logical field coordinates).
    ///
    /// On rejection nothing changes.
    pub fn request_place_obstacle(&mut self, pos: Vec2) -> Result<EntityId, PlacementRejection> {
        self.check_placement(pos)?;

        self.gold -= self.tuning.obstacle_cost;
        let id = self
            .store
            .add_obstacle(pos, self.tuning.obstacle_radius, self.tuning.obstacle_health);
        self.events.push(GameEvent::ObstaclePlaced { id, pos });
        log::debug!("Obstacle {} placed at ({:.0}, {:.0}), gold left {}", id, pos.x, pos.y, self.gold);
        Ok(id)
    }

    /// Validate a placement without performing it
    pub fn check_placement(&self, pos: Vec2) -> Result<(), PlacementRejection> {
        let tuning = &self.tuning;

        if self.phase != Phase::Building {
            return Err(PlacementRejection::WrongPhase(self.phase));
        }
        if self.gold < tuning.obstacle_cost {
            return Err(PlacementRejection::InsufficientGold {
                have: self.gold,
                need: tuning.obstacle_cost,
            });
        }
        // NaN fails every comparison below, so it has to be caught here
        if !pos.is_finite()
            || !(0.0..=tuning.field_width).contains(&pos.x)
            || !(0.0..=tuning.field_height).contains(&pos.y)
        {
            return Err(PlacementRejection::OutsideField);
        }
        if length(subtract(pos, self.objective.pos))
            < self.objective.radius + tuning.objective_exclusion
        {
            return Err(PlacementRejection::TooCloseToObjective);
        }
        if let Some(other) = self.store.obstacles.iter().find(|o| {
            discs_overlap(pos, tuning.obstacle_radius, o.pos, o.radius, tuning.obstacle_margin)
        }) {
            return Err(PlacementRejection::OverlapsObstacle(other.id));
        }

        Ok(())
    }

    /// Begin the next wave. Returns false (and does nothing) unless
    /// building with the objective intact.
    pub fn request_start_attack(&mut self) -> bool {
        if !self.can_start_attack() {
            log::debug!("Start attack ignored in {:?}", self.phase);
            return false;
        }

        self.wave += 1;
        self.phase = Phase::Attacking;
        self.spawner.restart();
        self.events.push(GameEvent::AttackStarted { wave: self.wave });
        log::info!("Wave {} started ({} obstacles, {} gold)", self.wave, self.store.obstacles.len(), self.gold);
        true
    }

    /// Return to a fresh session: building, wave 0, starting gold, zero
    /// score, full objective and no entities. Always succeeds.
    ///
    /// The id counter and RNG stream carry on, so ids stay unique. Events
    /// not yet drained are kept; `Reset` is appended after them.
    pub fn request_reset(&mut self) {
        self.phase = Phase::Building;
        self.wave = 0;
        self.gold = self.tuning.starting_gold;
        self.score = 0;
        self.objective = Objective::new(&self.tuning);
        self.store.clear();
        self.spawner.restart();
        self.turret.cooldown = 0.0;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
    }

    /// Halt the wave if the objective has fallen
    pub(crate) fn check_defeat(&mut self) -> bool {
        if self.phase == Phase::Attacking && self.objective.is_destroyed() {
            self.phase = Phase::Defeated;
            self.events.push(GameEvent::ObjectiveFallen { wave: self.wave });
            log::info!("Core fallen on wave {} (score {})", self.wave, self.score);
            return true;
        }
        false
    }

    /// End the wave once the field has been empty past the grace period
    pub(crate) fn check_wave_clear(&mut self) -> bool {
        if self.phase != Phase::Attacking
            || !self.store.agents.is_empty()
            || self.spawner.accumulator <= self.tuning.wave_clear_grace
        {
            return false;
        }

        let gold = self.tuning.wave_bonus_gold(self.wave);
        let score = self.tuning.wave_bonus_score;
        self.gold = self.gold.saturating_add(gold);
        self.score += score;
        self.phase = Phase::Building;
        self.events.push(GameEvent::WaveCleared {
            wave: self.wave,
            gold,
            score,
        });
        log::info!("Wave {} cleared: +{} gold, +{} score", self.wave, gold, score);
        true
    }
}
