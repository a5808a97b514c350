//! Character physics
//!
//! Vertical-only integrator in bottom-origin coordinates: y grows upward,
//! so a falling body has velocity <= 0.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::sanitize_dt;
use crate::tuning::Tuning;

/// What happened to the body during one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStep {
    /// Resting on the ground (no change)
    Grounded,
    /// In the air
    Airborne,
    /// Touched down this step
    Landed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterBody {
    pub y: f64,
    pub velocity_y: f64,
    pub is_jumping: bool,
    /// Edge-trigger latch: cleared by a jump, re-armed by releasing the input
    pub can_jump: bool,
    pub ground_y: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
}

impl CharacterBody {
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.ground_y();
        Self {
            y: ground_y,
            velocity_y: 0.0,
            is_jumping: false,
            can_jump: true,
            ground_y,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
        }
    }

    /// Advance position and velocity by `dt` reference frames
    pub fn integrate(&mut self, dt: f64) -> BodyStep {
        let dt = sanitize_dt(dt);
        let was_airborne = self.is_jumping || self.y > self.ground_y;
        let next_y = self.y + self.velocity_y * dt;

        if next_y <= self.ground_y && self.velocity_y <= 0.0 {
            self.y = self.ground_y;
            self.velocity_y = 0.0;
            self.is_jumping = false;
            return if was_airborne {
                BodyStep::Landed
            } else {
                BodyStep::Grounded
            };
        }

        self.y = next_y;
        self.velocity_y -= self.gravity * dt;
        BodyStep::Airborne
    }

    /// Start a jump. Returns `true` if the jump actually fired.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping || !self.can_jump {
            return false;
        }
        self.velocity_y = self.jump_impulse;
        self.is_jumping = true;
        self.can_jump = false;
        true
    }

    /// Jump input released: re-arm the latch
    pub fn release_jump(&mut self) {
        self.can_jump = true;
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping && self.y <= self.ground_y
    }

    /// Back to standing on the ground with the latch armed
    pub fn reset(&mut self) {
        self.y = self.ground_y;
        self.velocity_y = 0.0;
        self.is_jumping = false;
        self.can_jump = true;
    }

    /// Collision box at the character's fixed x
    pub fn bounds(&self, x: f64, size: DVec2) -> Aabb {
        Aabb::new(DVec2::new(x, self.y), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> CharacterBody {
        CharacterBody::new(&Tuning::default())
    }

    #[test]
    fn test_jump_arc_follows_closed_form() {
        let mut b = body();
        let g = b.gravity;
        let j = b.jump_impulse;
        let ground = b.ground_y;
        assert!(b.jump());

        let mut n = 0u32;
        loop {
            n += 1;
            let step = b.integrate(1.0);
            let nf = n as f64;
            let expected = ground + j * nf - g * nf * (nf - 1.0) / 2.0;
            if step == BodyStep::Landed {
                assert!(expected <= ground + 1e-9);
                break;
            }
            assert!((b.y - expected).abs() < 1e-9, "tick {}: {} vs {}", n, b.y, expected);
            assert!(n < 1000, "never landed");
        }
        assert_eq!(b.y, ground);
        assert_eq!(b.velocity_y, 0.0);
        assert!(!b.is_jumping);
    }

    #[test]
    fn test_second_jump_while_airborne_is_ignored() {
        let mut b = body();
        assert!(b.jump());
        assert!(b.is_jumping);
        b.integrate(1.0);
        let v = b.velocity_y;
        // Even with the latch re-armed, no double jump
        b.release_jump();
        assert!(!b.jump());
        assert_eq!(b.velocity_y, v);
    }

    #[test]
    fn test_held_jump_does_not_refire_on_landing() {
        let mut b = body();
        assert!(b.jump());
        while b.integrate(1.0) != BodyStep::Landed {}
        // Still held: latch not re-armed
        assert!(!b.jump());
        b.release_jump();
        assert!(b.jump());
    }

    #[test]
    fn test_grounded_step_is_stable() {
        let mut b = body();
        assert_eq!(b.integrate(1.0), BodyStep::Grounded);
        assert_eq!(b.integrate(3.0), BodyStep::Grounded);
        assert_eq!(b.y, b.ground_y);
    }

    #[test]
    fn test_nan_dt_is_a_no_op() {
        let mut b = body();
        b.jump();
        b.integrate(1.0);
        let (y, v) = (b.y, b.velocity_y);
        b.integrate(f64::NAN);
        b.integrate(-5.0);
        assert_eq!(b.y, y);
        assert_eq!(b.velocity_y, v);
    }

    proptest! {
        #[test]
        fn prop_landing_converges(dt in 0.01f64..4.0) {
            let mut b = body();
            b.jump();
            let mut steps = 0;
            while b.is_jumping && steps < 100_000 {
                b.integrate(dt);
                prop_assert!(b.y >= b.ground_y);
                steps += 1;
            }
            prop_assert_eq!(b.y, b.ground_y);
            prop_assert_eq!(b.velocity_y, 0.0);
            // Further integration stays put
            b.integrate(dt);
            prop_assert_eq!(b.y, b.ground_y);
        }
    }
}
