//! Agent movement and contact resolution
//!
//! Agents steer straight at the objective with no inertia. Obstacles push
//! them back softly and take damage for every second of contact. Reaching
//! the objective damages it and slides the agent sideways so the crowd
//! circles instead of stacking up on one spot.

use super::collision::{orbit_tangent, point_in_zone, push_out};
use super::state::{HostileAgent, Objective, Obstacle};
use crate::tuning::Tuning;
use crate::{add, normalize, scale, subtract};

/// Totals from one movement pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Objective damage dealt this pass
    pub objective_damage: f32,
    /// Agents touching the objective at the end of the pass
    pub agents_at_objective: usize,
    /// Agent/obstacle contacts this pass
    pub obstacle_contacts: usize,
}

/// Move every agent one step and apply contact damage.
///
/// Obstacle health may go negative here; removal and refunds happen in the
/// prune that follows, once every agent has had its turn.
pub fn advance_agents(
    agents: &mut [HostileAgent],
    obstacles: &mut [Obstacle],
    objective: &mut Objective,
    tuning: &Tuning,
    dt: f32,
) -> ContactReport {
    let mut report = ContactReport::default();

    for agent in agents.iter_mut() {
        let heading = normalize(subtract(objective.pos, agent.pos));
        agent.vel = scale(heading, agent.speed);

        for obstacle in obstacles.iter_mut() {
            let contact = point_in_zone(
                agent.pos,
                obstacle.pos,
                obstacle.radius + tuning.contact_padding,
            );
            if contact.hit {
                agent.pos = push_out(agent.pos, &contact, tuning.pushback_factor);
                obstacle.health -= tuning.obstacle_contact_dps * dt;
                report.obstacle_contacts += 1;
            }
        }

        agent.pos = add(agent.pos, scale(agent.vel, dt));

        let at_objective = point_in_zone(
            agent.pos,
            objective.pos,
            objective.radius + tuning.contact_padding,
        );
        if at_objective.hit {
            let before = objective.health;
            objective.apply_damage(tuning.objective_contact_dps * dt);
            report.objective_damage += before - objective.health;
            report.agents_at_objective += 1;

            agent.pos += orbit_tangent(agent.pos, objective.pos) * (tuning.orbit_speed * dt);
        }
    }

    report
}
