//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - One `tick` per frame, with no rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;
pub mod wave;

pub use collision::{CollisionResult, discs_overlap, point_in_zone};
pub use combat::{Hit, Shot, Turret};
pub use snapshot::Snapshot;
pub use spawn::{NewAgent, SpawnDirector};
pub use state::{
    EntityId, GameEvent, GameState, HostileAgent, Objective, Obstacle, Phase, Projectile,
};
pub use store::{EntityStore, PruneReport};
pub use tick::tick;
pub use wave::PlacementRejection;
