//! Marcy Run - A side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `game`: Host-facing driver that turns frame timestamps into ticks
//! - `input`: Per-tick sampled input state
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod input;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use input::{InputEvent, InputState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame interval (60 Hz). A normalized dt of 1.0 is one of these.
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest normalized delta a single tick may apply (prevents tunneling
    /// through the ground or obstacles after a stall)
    pub const MAX_FRAME_DT: f64 = 4.0;

    /// Default world seed
    pub const DEFAULT_SEED: u64 = 0x6d61_7263_7921;
}

/// Convert a normalized delta into milliseconds of game time
#[inline]
pub fn dt_to_ms(dt: f64) -> f64 {
    dt * consts::FRAME_MS
}

/// Replace negative and non-finite deltas with zero
#[inline]
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(1.5), 1.5);
        assert_eq!(sanitize_dt(-2.0), 0.0);
        assert_eq!(sanitize_dt(f64::NAN), 0.0);
        assert_eq!(sanitize_dt(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_dt_to_ms() {
        assert!((dt_to_ms(1.0) - 16.666_666).abs() < 0.001);
        assert!((dt_to_ms(6.0) - 100.0).abs() < 1e-9);
    }
}
