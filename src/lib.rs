//! Bulwark - a build-and-defend wave simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, combat, wave lifecycle)
//! - `clock`: Frame clock feeding clamped deltas into the simulation
//! - `tuning`: Data-driven game balance
//! - `web`: Browser bindings (wasm32 only)

pub mod clock;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::SimClock;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Largest delta a single frame may advance the simulation by (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Objective (the core) defaults
    pub const OBJECTIVE_RADIUS: f32 = 26.0;
    pub const OBJECTIVE_MAX_HEALTH: f32 = 100.0;

    /// Gold at the start of a session
    pub const STARTING_GOLD: u32 = 120;

    /// Draw sizes handed to the presentation layer
    pub const AGENT_RADIUS: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;
}

/// Vector length
#[inline]
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`.
///
/// A zero vector is divided by 1 instead of 0, so it comes back as zero
/// rather than NaN.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len == 0.0 { v } else { v / len }
}

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    v * s
}

/// Left-hand perpendicular of `v` (rotated +90°)
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Turn a host-supplied number (JS has no integers) into an RNG seed.
///
/// Whole numbers in `0..2^64` map to themselves. Anything else (fractions,
/// negatives, NaN, infinities) uses its bit pattern, so distinct inputs
/// still give distinct seeds.
pub fn seed_from_f64(seed: f64) -> u64 {
    if seed.fract() == 0.0 && (0.0..18_446_744_073_709_551_616.0).contains(&seed) {
        seed as u64
    } else {
        seed.to_bits()
    }
}
