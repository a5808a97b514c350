//! Scrolling entities (coins and obstacles)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::sanitize_dt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Coin,
    Obstacle,
}

/// A coin or obstacle moving through the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    pub kind: EntityKind,
    /// Bottom-left corner, bottom-origin coordinates
    pub pos: DVec2,
    pub size: DVec2,
    /// Coin has been collected and is waiting for removal
    pub consumed: bool,
    /// Obstacle has already ended a run (kept for presentation)
    pub hit: bool,
}

impl Entity {
    pub fn new(id: u64, kind: EntityKind, pos: DVec2, size: DVec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            consumed: false,
            hit: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Fully past the left edge of the viewport
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= -self.size.x
    }
}

/// Scroll every entity left by `speed * dt`, then drop consumed coins and
/// anything that has left the screen. Hit obstacles keep scrolling.
pub fn advance(entities: &mut Vec<Entity>, speed: f64, dt: f64) {
    let step = speed * sanitize_dt(dt);
    entities.retain_mut(|entity| {
        if entity.consumed {
            return false;
        }
        entity.pos.x -= step;
        !entity.is_off_screen()
    });
}
