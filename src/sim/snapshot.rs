//! Read-only views for the presentation layer
//!
//! A snapshot is a plain copy of what a renderer or HUD needs; it never
//! hands out references into the live state.

use glam::Vec2;
use serde::Serialize;

use super::state::{EntityId, GameState, Phase};
use crate::consts::{AGENT_RADIUS, PROJECTILE_RADIUS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// 0..=1, for the health ring
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub ttl: f32,
}

/// Everything needed to draw a frame and fill in the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub wave: u32,
    pub gold: u32,
    pub score: u64,
    pub field_width: f32,
    pub field_height: f32,
    pub obstacle_cost: u32,
    pub can_start_attack: bool,
    pub objective: ObjectiveView,
    pub obstacles: Vec<ObstacleView>,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            wave: self.wave,
            gold: self.gold,
            score: self.score,
            field_width: self.tuning.field_width,
            field_height: self.tuning.field_height,
            obstacle_cost: self.tuning.obstacle_cost,
            can_start_attack: self.can_start_attack(),
            objective: ObjectiveView {
                pos: self.objective.pos,
                radius: self.objective.radius,
                health: self.objective.health,
                max_health: self.objective.max_health,
            },
            obstacles: self
                .store
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    pos: o.pos,
                    radius: o.radius,
                    health: o.health,
                    max_health: o.max_health,
                    health_fraction: o.health_fraction(),
                })
                .collect(),
            agents: self
                .store
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    pos: a.pos,
                    vel: a.vel,
                    radius: AGENT_RADIUS,
                    health: a.health,
                })
                .collect(),
            projectiles: self
                .store
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    radius: PROJECTILE_RADIUS,
                    ttl: p.ttl,
                })
                .collect(),
        }
    }

    /// Snapshot as JSON, for hosts on the other side of an FFI boundary
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}
