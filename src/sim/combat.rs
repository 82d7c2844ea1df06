//! Turret targeting and projectile resolution
//!
//! The objective carries a turret that fires at the closest agent on a
//! fixed cooldown. Shots fly straight, hit at most one agent, and never
//! damage the objective or obstacles.

use glam::Vec2;

use super::state::{EntityId, HostileAgent, Phase, Projectile};
use super::store::EntityStore;
use crate::tuning::Tuning;
use crate::{length, normalize, subtract};

/// Objective-mounted turret
#[derive(Debug, Clone, Default)]
pub struct Turret {
    /// Seconds until the next shot is allowed (may go negative while idle)
    pub cooldown: f32,
}

/// A shot the turret just fired
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub projectile: EntityId,
    pub target: EntityId,
}

/// A projectile striking an agent
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub agent: EntityId,
    /// Whether this hit took the agent to zero health
    pub lethal: bool,
}

/// Closest living agent to `origin`; the first one wins a tie
pub fn nearest_agent(agents: &[HostileAgent], origin: Vec2) -> Option<&HostileAgent> {
    let mut best: Option<(&HostileAgent, f32)> = None;
    for agent in agents.iter().filter(|a| a.is_alive()) {
        let d = length(subtract(agent.pos, origin));
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((agent, d)),
        }
    }
    best.map(|(agent, _)| agent)
}

impl Turret {
    /// Count down and fire at the nearest agent if ready.
    ///
    /// Only fires while attacking. The new projectile starts at `origin`.
    pub fn update(
        &mut self,
        dt: f32,
        phase: Phase,
        origin: Vec2,
        store: &mut EntityStore,
        tuning: &Tuning,
    ) -> Option<Shot> {
        self.cooldown -= dt;
        if phase != Phase::Attacking || self.cooldown > 0.0 {
            return None;
        }

        let (target, target_pos) = nearest_agent(&store.agents, origin).map(|a| (a.id, a.pos))?;
        self.cooldown = tuning.turret_cooldown;

        let vel = normalize(subtract(target_pos, origin)) * tuning.projectile_speed;
        let projectile = store.add_projectile(origin, vel, tuning.projectile_lifetime);

        Some(Shot { projectile, target })
    }
}

/// Fly every live projectile one step and resolve impacts.
///
/// A projectile damages the first living agent within the impact radius,
/// then its lifetime is zeroed so the next prune removes it.
pub fn advance_projectiles(
    projectiles: &mut [Projectile],
    agents: &mut [HostileAgent],
    tuning: &Tuning,
    dt: f32,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut().filter(|p| !p.is_expired()) {
        projectile.ttl -= dt;
        projectile.pos += projectile.vel * dt;

        let struck = agents.iter_mut().filter(|a| a.is_alive()).find(|a| {
            length(subtract(a.pos, projectile.pos)) < tuning.impact_radius
        });

        if let Some(agent) = struck {
            agent.health -= tuning.projectile_damage;
            projectile.ttl = 0.0;
            hits.push(Hit {
                projectile: projectile.id,
                agent: agent.id,
                lethal: !agent.is_alive(),
            });
        }
    }

    hits
}
