//! Frame clock
//!
//! Converts host frame timestamps (milliseconds) into a normalized delta where
//! 1.0 is one reference frame at 60 Hz.

use crate::consts::{FRAME_MS, MAX_FRAME_DT};
use crate::sanitize_dt;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Whether deltas are being produced (false while the host is unfocused)
    pub running: bool,
    last_timestamp: Option<f64>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            running: true,
            last_timestamp: None,
        }
    }

    /// Record a frame timestamp and return the normalized delta since the last one.
    ///
    /// The first call after a reset only establishes the baseline and returns 0.
    /// Backwards or malformed timestamps yield 0; large gaps are clamped.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        if !self.running {
            return 0.0;
        }
        if !timestamp_ms.is_finite() {
            log::debug!("clock: ignoring non-finite timestamp");
            return 0.0;
        }

        let dt = match self.last_timestamp {
            Some(last) => sanitize_dt((timestamp_ms - last) / FRAME_MS),
            None => 0.0,
        };
        // Never move the baseline backwards
        if self.last_timestamp.is_none_or(|last| timestamp_ms > last) {
            self.last_timestamp = Some(timestamp_ms);
        }

        if dt > MAX_FRAME_DT {
            log::trace!("clock: clamping dt {:.2} -> {:.2}", dt, MAX_FRAME_DT);
            MAX_FRAME_DT
        } else {
            dt
        }
    }

    /// Forget the baseline so the next frame produces a zero delta
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    /// Stop producing deltas (baseline is dropped)
    pub fn suspend(&mut self) {
        self.running = false;
        self.reset();
    }

    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.reset();
        }
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}
