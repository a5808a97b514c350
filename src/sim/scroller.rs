//! Parallax offsets for the repeating background and ground strips

use serde::{Deserialize, Serialize};

use crate::sanitize_dt;
use crate::tuning::Tuning;

/// One horizontally tiled layer. `offset` stays in `(-tile_width, 0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub offset: f64,
    pub speed: f64,
    pub tile_width: f64,
}

impl ParallaxLayer {
    pub fn new(speed: f64, tile_width: f64) -> Self {
        Self {
            offset: 0.0,
            speed,
            tile_width,
        }
    }

    /// Scroll left by `speed * dt`. Wrapping keeps the remainder, so the
    /// seam between tiles never jumps.
    pub fn advance(&mut self, dt: f64) {
        if self.tile_width <= 0.0 {
            return;
        }
        self.offset -= self.speed * sanitize_dt(dt);
        if self.offset <= -self.tile_width {
            self.offset = self.offset.rem_euclid(self.tile_width);
            if self.offset > 0.0 {
                self.offset -= self.tile_width;
            }
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

/// Both scrolling layers of the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scroller {
    pub background: ParallaxLayer,
    pub ground: ParallaxLayer,
}

impl Scroller {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            background: ParallaxLayer::new(tuning.background_speed, tuning.tile_width),
            ground: ParallaxLayer::new(tuning.game_speed, tuning.tile_width),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.background.advance(dt);
        self.ground.advance(dt);
    }

    pub fn reset(&mut self) {
        self.background.reset();
        self.ground.reset();
    }
}
