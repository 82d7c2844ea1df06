//! Browser bindings
//!
//! A thin `wasm-bindgen` wrapper: the page owns the canvas, the buttons
//! and pointer mapping, and calls in here once per animation frame.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::clock::SimClock;
use crate::seed_from_f64;
use crate::sim::{GameState, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bulwark simulation loaded");
}

/// Simulation handle owned by the page
#[wasm_bindgen]
pub struct Simulation {
    state: GameState,
    clock: SimClock,
}

#[wasm_bindgen]
impl Simulation {
    /// Create a session. Without a seed, one is taken from the current time.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Simulation {
        let seed = seed_from_f64(seed.unwrap_or_else(js_sys::Date::now));
        Self::with_state(GameState::new(seed))
    }

    /// Create a session from a (possibly partial) JSON tuning table
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<Simulation, JsError> {
        let tuning = Tuning::from_json(tuning_json)?;
        Ok(Self::with_state(GameState::with_tuning(seed_from_f64(seed), tuning)))
    }

    /// Advance by the time since the previous frame (`requestAnimationFrame` timestamp)
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        tick(&mut self.state, dt);
    }

    /// Advance by an explicit delta in seconds
    pub fn update(&mut self, dt: f32) {
        tick(&mut self.state, dt.min(self.state.tuning.max_frame_dt));
    }

    /// Place an obstacle at logical field coordinates; false if rejected
    pub fn place_obstacle(&mut self, x: f32, y: f32) -> bool {
        match self.state.request_place_obstacle(Vec2::new(x, y)) {
            Ok(_) => true,
            Err(reason) => {
                log::debug!("Placement rejected: {}", reason);
                false
            }
        }
    }

    pub fn start_attack(&mut self) -> bool {
        self.state.request_start_attack()
    }

    pub fn reset(&mut self) {
        self.state.request_reset();
        self.clock.reset();
    }

    /// Current state as JSON (see `Snapshot`)
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(self.state.snapshot_json()?)
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.state.drain_events())?)
    }
}

impl Simulation {
    fn with_state(state: GameState) -> Self {
        let clock = SimClock::new(state.tuning.max_frame_dt);
        Self { state, clock }
    }
}
