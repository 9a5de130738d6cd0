//! Frame timestamps to bounded delta time

use crate::consts::MAX_DT;

/// Converts a monotonic timestamp feed (milliseconds) into clamped step lengths
#[derive(Debug, Clone)]
pub struct Clock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(MAX_DT)
    }
}

impl Clock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Feed the next frame timestamp and get the step in seconds.
    ///
    /// The first timestamp only establishes the baseline and yields 0. A
    /// timestamp that goes backwards also yields 0 and becomes the new baseline.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            None => 0.0,
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt),
        };
        self.last_ms = Some(now_ms);
        if dt.is_nan() { 0.0 } else { dt }
    }

    /// Forget the baseline (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
