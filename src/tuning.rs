//! Data-driven game balance
//!
//! Every number the simulation uses lives here. Missing keys in a tuning
//! file fall back to the defaults below, so a file can override just the
//! values being experimented with.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance table for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Objective ===
    pub objective_radius: f32,
    pub objective_max_health: f32,

    // === Economy ===
    pub starting_gold: u32,

    // === Obstacles ===
    pub obstacle_cost: u32,
    pub obstacle_radius: f32,
    pub obstacle_health: f32,
    /// Extra clearance required between two obstacle footprints
    pub obstacle_margin: f32,
    /// Clearance around the objective where nothing may be built
    pub objective_exclusion: f32,
    /// Gold returned when an obstacle is destroyed
    pub obstacle_refund: u32,

    // === Hostile agents ===
    /// Added to obstacle/objective radius to form the contact zone
    pub contact_padding: f32,
    /// Fraction of overlap removed per frame when pushed out of an obstacle
    pub pushback_factor: f32,
    /// Obstacle damage per second of contact
    pub obstacle_contact_dps: f32,
    /// Objective damage per second of contact
    pub objective_contact_dps: f32,
    /// Tangential drift around the objective (units/s)
    pub orbit_speed: f32,
    pub kill_score: u64,

    // === Spawning ===
    pub spawn_margin: f32,
    pub spawn_cap_base: u32,
    pub spawn_cap_per_wave: u32,
    pub spawn_cap_max: u32,
    pub spawn_interval_base: f32,
    pub spawn_interval_per_wave: f32,
    pub spawn_interval_min: f32,
    pub agent_speed_min: f32,
    pub agent_speed_max: f32,
    pub agent_speed_per_wave: f32,
    pub agent_health_base: f32,
    pub agent_health_per_wave: f32,

    // === Turret ===
    pub turret_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub impact_radius: f32,
    pub projectile_damage: f32,
    pub hit_score: u64,

    // === Waves ===
    /// Keep spawning up to the live cap forever instead of stopping at the
    /// wave quota. Waves then only end if the spawn interval exceeds the
    /// clear grace period.
    pub endless_waves: bool,
    /// Quiet time with no agents before a wave counts as cleared
    pub wave_clear_grace: f32,
    pub wave_bonus_gold_base: u32,
    pub wave_bonus_gold_per_wave: u32,
    pub wave_bonus_score: u64,

    // === Clock ===
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            objective_radius: OBJECTIVE_RADIUS,
            objective_max_health: OBJECTIVE_MAX_HEALTH,

            starting_gold: STARTING_GOLD,

            obstacle_cost: 15,
            obstacle_radius: 24.0,
            obstacle_health: 60.0,
            obstacle_margin: 6.0,
            objective_exclusion: 40.0,
            obstacle_refund: 2,

            contact_padding: 8.0,
            pushback_factor: 0.6,
            obstacle_contact_dps: 10.0,
            objective_contact_dps: 12.0,
            orbit_speed: 30.0,
            kill_score: 10,

            spawn_margin: 40.0,
            spawn_cap_base: 6,
            spawn_cap_per_wave: 4,
            spawn_cap_max: 18,
            spawn_interval_base: 1.2,
            spawn_interval_per_wave: 0.08,
            spawn_interval_min: 0.35,
            agent_speed_min: 30.0,
            agent_speed_max: 50.0,
            agent_speed_per_wave: 4.0,
            agent_health_base: 20.0,
            agent_health_per_wave: 6.0,

            turret_cooldown: 0.25,
            projectile_speed: 500.0,
            projectile_lifetime: 1.6,
            impact_radius: 10.0,
            projectile_damage: 18.0,
            hit_score: 2,

            endless_waves: false,
            wave_clear_grace: 1.2,
            wave_bonus_gold_base: 30,
            wave_bonus_gold_per_wave: 10,
            wave_bonus_score: 50,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Why a tuning table was refused
#[derive(Debug)]
pub enum TuningError {
    Json(serde_json::Error),
    /// A value is NaN or infinite
    NotFinite(&'static str),
    /// A value that must be above zero is not
    NotPositive(&'static str),
    /// A value that must not be negative is
    Negative(&'static str),
    /// A `min` is above its `max`
    InvertedRange(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            TuningError::NotPositive(field) => write!(f, "{} must be above zero", field),
            TuningError::Negative(field) => write!(f, "{} must not be negative", field),
            TuningError::InvertedRange(field) => write!(f, "{} range has min above max", field),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value the simulation divides by, samples from or clamps to
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("objective_radius", self.objective_radius),
            ("objective_max_health", self.objective_max_health),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_health", self.obstacle_health),
            ("obstacle_margin", self.obstacle_margin),
            ("objective_exclusion", self.objective_exclusion),
            ("contact_padding", self.contact_padding),
            ("pushback_factor", self.pushback_factor),
            ("obstacle_contact_dps", self.obstacle_contact_dps),
            ("objective_contact_dps", self.objective_contact_dps),
            ("orbit_speed", self.orbit_speed),
            ("spawn_margin", self.spawn_margin),
            ("spawn_interval_base", self.spawn_interval_base),
            ("spawn_interval_per_wave", self.spawn_interval_per_wave),
            ("spawn_interval_min", self.spawn_interval_min),
            ("agent_speed_min", self.agent_speed_min),
            ("agent_speed_max", self.agent_speed_max),
            ("agent_speed_per_wave", self.agent_speed_per_wave),
            ("agent_health_base", self.agent_health_base),
            ("agent_health_per_wave", self.agent_health_per_wave),
            ("turret_cooldown", self.turret_cooldown),
            ("projectile_speed", self.projectile_speed),
            ("projectile_lifetime", self.projectile_lifetime),
            ("impact_radius", self.impact_radius),
            ("projectile_damage", self.projectile_damage),
            ("wave_clear_grace", self.wave_clear_grace),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::NotFinite(field));
            }
            if value < 0.0 {
                return Err(TuningError::Negative(field));
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("objective_max_health", self.objective_max_health),
            ("obstacle_health", self.obstacle_health),
            ("agent_health_base", self.agent_health_base),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive(field));
            }
        }

        if self.agent_speed_min > self.agent_speed_max {
            return Err(TuningError::InvertedRange("agent_speed"));
        }
        Ok(())
    }

    /// Load a tuning file, falling back to defaults if it is missing, malformed
    /// or fails validation
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Centre of the field, where the objective sits
    pub fn objective_position(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Maximum number of live agents during a wave
    pub fn spawn_cap(&self, wave: u32) -> usize {
        let cap = self
            .spawn_cap_base
            .saturating_add(self.spawn_cap_per_wave.saturating_mul(wave));
        cap.min(self.spawn_cap_max) as usize
    }

    /// Total agents a wave sends, or `None` for endless waves.
    ///
    /// A wave brings as many agents as its live cap.
    pub fn wave_quota(&self, wave: u32) -> Option<usize> {
        if self.endless_waves {
            None
        } else {
            Some(self.spawn_cap(wave))
        }
    }

    /// Seconds between spawns during a wave
    pub fn spawn_interval(&self, wave: u32) -> f32 {
        (self.spawn_interval_base - self.spawn_interval_per_wave * wave as f32)
            .max(self.spawn_interval_min)
    }

    /// Starting health of an agent spawned in `wave`
    pub fn agent_health(&self, wave: u32) -> f32 {
        self.agent_health_base + self.agent_health_per_wave * wave as f32
    }

    /// Speed added on top of the random base speed in `wave`
    pub fn agent_speed_bonus(&self, wave: u32) -> f32 {
        self.agent_speed_per_wave * wave as f32
    }

    /// Gold awarded for clearing `wave`
    pub fn wave_bonus_gold(&self, wave: u32) -> u32 {
        self.wave_bonus_gold_base
            .saturating_add(self.wave_bonus_gold_per_wave.saturating_mul(wave))
    }
}
