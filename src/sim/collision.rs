//! Collision detection
//!
//! Axis-aligned boxes in bottom-origin coordinates. Entities are tested with
//! their box inflated by a forgiveness buffer on every side.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Axis-aligned bounding box (`min` is the bottom-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(min: DVec2, size: DVec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(DVec2::new(x, y), DVec2::new(width, height))
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Grow by `buffer` on each side (width and height grow by 2 * buffer)
    pub fn inflate(&self, buffer: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(buffer),
            size: self.size + DVec2::splat(2.0 * buffer),
        }
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Outcome of testing one collection against the character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Entities that were newly flagged this call
    pub new_hits: u32,
}

/// Mark every not-yet-consumed coin touching the character as consumed.
/// Already consumed coins never count twice.
pub fn collect_coins(character: &Aabb, coins: &mut [Entity], buffer: f64) -> CollisionReport {
    let mut report = CollisionReport::default();
    for coin in coins.iter_mut().filter(|c| !c.consumed) {
        if coin.bounds().inflate(buffer).intersects(character) {
            coin.consumed = true;
            report.new_hits += 1;
        }
    }
    report
}

/// Mark obstacles touching the character as hit. Obstacles that were already
/// hit are skipped so their side effects are not repeated.
pub fn strike_obstacles(
    character: &Aabb,
    obstacles: &mut [Entity],
    buffer: f64,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    for obstacle in obstacles.iter_mut().filter(|o| !o.hit) {
        if obstacle.bounds().inflate(buffer).intersects(character) {
            obstacle.hit = true;
            report.new_hits += 1;
        }
    }
    report
}
