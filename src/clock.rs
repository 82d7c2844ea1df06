//! Frame clock
//!
//! Turns host timestamps (milliseconds, e.g. from `requestAnimationFrame`)
//! into per-frame deltas. A long stall such as a backgrounded tab is clamped
//! to a single short step; there is no substepping.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone)]
pub struct SimClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl SimClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Record a frame timestamp and return the delta (seconds) to simulate.
    ///
    /// The first frame yields 0. Time running backwards also yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let last = self.last_ms.replace(now_ms).unwrap_or(now_ms);
        let dt = ((now_ms - last) / 1000.0) as f32;
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (e.g. after the host was paused)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
