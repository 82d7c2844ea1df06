//! Entity storage
//!
//! Ids are handed out from a single counter and never reused, and every
//! collection is only ever appended to, so each `Vec` stays sorted by id.
//! That gives a stable iteration order and `O(log n)` lookup by id.

use glam::Vec2;

use super::state::{EntityId, HostileAgent, Obstacle, Projectile};

/// What a prune pass removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneReport {
    /// Agents whose health reached zero (id, last position)
    pub killed_agents: Vec<(EntityId, Vec2)>,
    /// Obstacles whose health reached zero (id, position)
    pub destroyed_obstacles: Vec<(EntityId, Vec2)>,
    /// Projectiles that hit something or ran out of time
    pub expired_projectiles: usize,
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    pub obstacles: Vec<Obstacle>,
    pub agents: Vec<HostileAgent>,
    pub projectiles: Vec<Projectile>,
    next_id: EntityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            agents: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }
}

impl EntityStore {
    /// Allocate a new entity ID
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id the next allocation will return
    pub fn peek_next_id(&self) -> EntityId {
        self.next_id
    }

    pub fn add_obstacle(&mut self, pos: Vec2, radius: f32, health: f32) -> EntityId {
        let id = self.allocate_id();
        self.obstacles.push(Obstacle {
            id,
            pos,
            radius,
            health,
            max_health: health,
        });
        id
    }

    pub fn add_agent(&mut self, pos: Vec2, speed: f32, health: f32) -> EntityId {
        let id = self.allocate_id();
        self.agents.push(HostileAgent {
            id,
            pos,
            vel: Vec2::ZERO,
            health,
            speed,
        });
        id
    }

    pub fn add_projectile(&mut self, pos: Vec2, vel: Vec2, ttl: f32) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.push(Projectile { id, pos, vel, ttl });
        id
    }

    pub fn obstacle(&self, id: EntityId) -> Option<&Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.obstacles[i])
    }

    pub fn agent(&self, id: EntityId) -> Option<&HostileAgent> {
        self.agents
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.agents[i])
    }

    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut HostileAgent> {
        match self.agents.binary_search_by_key(&id, |a| a.id) {
            Ok(i) => Some(&mut self.agents[i]),
            Err(_) => None,
        }
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.projectiles[i])
    }

    /// Drop every dead agent, destroyed obstacle and spent projectile.
    ///
    /// Runs once per step, after all damage for the step has been applied.
    pub fn prune(&mut self) -> PruneReport {
        let mut report = PruneReport::default();

        self.agents.retain(|a| {
            if a.is_alive() {
                true
            } else {
                report.killed_agents.push((a.id, a.pos));
                false
            }
        });

        self.obstacles.retain(|o| {
            if o.is_destroyed() {
                report.destroyed_obstacles.push((o.id, o.pos));
                false
            } else {
                true
            }
        });

        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.is_expired());
        report.expired_projectiles = before - self.projectiles.len();

        report
    }

    /// Empty every collection. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.agents.clear();
        self.projectiles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.agents.is_empty() && self.projectiles.is_empty()
    }
}
