//! Game balance knobs
//!
//! Pure numeric tuning. Loaded from JSON when the host provides a file,
//! otherwise the defaults below are used. Values are per reference frame
//! (see `consts::FRAME_MS`) unless the field name says milliseconds.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;
use crate::sim::state::CharacterId;

/// Inclusive millisecond range a spawn interval is rolled from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalRange {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl IntervalRange {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Midpoint of the range (expected spawn gap)
    pub fn mean(&self) -> f64 {
        (self.min_ms + self.max_ms) / 2.0
    }
}

/// Price of each playable character, in coins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPrices {
    pub ben: u64,
    pub gonzalo: u64,
    pub motun: u64,
}

impl Default for CharacterPrices {
    fn default() -> Self {
        Self {
            ben: 0,
            gonzalo: 50,
            motun: 100,
        }
    }
}

impl CharacterPrices {
    pub fn price(&self, id: CharacterId) -> u64 {
        match id {
            CharacterId::Ben => self.ben,
            CharacterId::Gonzalo => self.gonzalo,
            CharacterId::Motun => self.motun,
        }
    }
}

/// Every configurable constant of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f64,
    pub viewport_height: f64,

    // === Character ===
    /// Downward acceleration per frame²
    pub gravity: f64,
    /// Upward velocity applied by a jump
    pub jump_impulse: f64,
    /// Height of the ground strip from the bottom of the viewport
    pub ground_height: f64,
    /// Sprite padding below the character's feet
    pub character_baseline_offset: f64,
    /// Fixed horizontal position of the character's box
    pub character_x: f64,
    pub character_size: DVec2,

    // === World scrolling ===
    /// Entity and ground scroll speed (pixels per frame)
    pub game_speed: f64,
    /// Distant background scroll speed (pixels per frame)
    pub background_speed: f64,
    /// Width of one repeating ground/background tile
    pub tile_width: f64,

    // === Coins ===
    pub coin_size: DVec2,
    /// Coin row height above the ground strip
    pub coin_height: f64,
    /// Gap between coins in a batch, in coin widths
    pub coin_spacing: f64,
    pub coin_interval: IntervalRange,
    pub coin_buffer: f64,

    // === Obstacles ===
    pub obstacle_size: DVec2,
    pub obstacle_baseline_offset: f64,
    pub obstacle_interval: IntervalRange,
    pub obstacle_buffer: f64,

    // === Run ===
    /// Score increases by one every `score_period_ms` of play
    pub score_period_ms: f64,
    /// Restart lockout after a game over
    pub game_over_countdown_ms: f64,
    pub prices: CharacterPrices,
    /// RNG seed for spawn timing and coin batch sizes
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,

            gravity: 0.3,
            jump_impulse: 20.0,
            ground_height: 100.0,
            character_baseline_offset: -70.0,
            character_x: 50.0,
            character_size: DVec2::new(250.0, 250.0),

            game_speed: 7.0,
            background_speed: 0.1,
            tile_width: 1280.0,

            coin_size: DVec2::new(90.0, 90.0),
            coin_height: 200.0,
            coin_spacing: 2.0,
            coin_interval: IntervalRange::new(1500.0, 3000.0),
            coin_buffer: 10.0,

            obstacle_size: DVec2::new(80.0, 70.0),
            obstacle_baseline_offset: -70.0,
            obstacle_interval: IntervalRange::new(2000.0, 4000.0),
            obstacle_buffer: 10.0,

            score_period_ms: 100.0,
            game_over_countdown_ms: 3000.0,
            prices: CharacterPrices::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Resting height of the character's box (bottom-origin)
    pub fn ground_y(&self) -> f64 {
        self.ground_height + self.character_baseline_offset
    }

    /// Height every coin in a batch shares
    pub fn coin_y(&self) -> f64 {
        self.ground_height + self.coin_height
    }

    pub fn obstacle_y(&self) -> f64 {
        self.ground_height + self.obstacle_baseline_offset
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        fn fix(name: &str, value: &mut f64, fallback: f64, allow_zero: bool) {
            let ok = value.is_finite() && (*value > 0.0 || (allow_zero && *value == 0.0));
            if !ok {
                log::warn!("tuning: {} = {} is invalid, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fix("viewport_width", &mut self.viewport_width, defaults.viewport_width, false);
        fix("viewport_height", &mut self.viewport_height, defaults.viewport_height, false);
        fix("gravity", &mut self.gravity, defaults.gravity, false);
        fix("jump_impulse", &mut self.jump_impulse, defaults.jump_impulse, true);
        fix("game_speed", &mut self.game_speed, defaults.game_speed, true);
        fix("background_speed", &mut self.background_speed, defaults.background_speed, true);
        fix("tile_width", &mut self.tile_width, defaults.tile_width, false);
        fix("coin_spacing", &mut self.coin_spacing, defaults.coin_spacing, true);
        fix("coin_buffer", &mut self.coin_buffer, defaults.coin_buffer, true);
        fix("obstacle_buffer", &mut self.obstacle_buffer, defaults.obstacle_buffer, true);
        fix("score_period_ms", &mut self.score_period_ms, defaults.score_period_ms, false);
        fix(
            "game_over_countdown_ms",
            &mut self.game_over_countdown_ms,
            defaults.game_over_countdown_ms,
            true,
        );

        for (name, size, fallback) in [
            ("character_size", &mut self.character_size, defaults.character_size),
            ("coin_size", &mut self.coin_size, defaults.coin_size),
            ("obstacle_size", &mut self.obstacle_size, defaults.obstacle_size),
        ] {
            if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
                log::warn!("tuning: {} = {:?} is invalid, using {:?}", name, size, fallback);
                *size = fallback;
            }
        }

        for (name, range, fallback) in [
            ("coin_interval", &mut self.coin_interval, defaults.coin_interval),
            ("obstacle_interval", &mut self.obstacle_interval, defaults.obstacle_interval),
        ] {
            if range.min_ms > range.max_ms {
                log::warn!("tuning: {} bounds swapped, reordering", name);
                std::mem::swap(&mut range.min_ms, &mut range.max_ms);
            }
            // A zero interval would spawn on every frame, including zero-length ones
            if !range.min_ms.is_finite() || !range.max_ms.is_finite() || range.min_ms <= 0.0 {
                log::warn!("tuning: {} = {:?} is invalid, using {:?}", name, range, fallback);
                *range = fallback;
            }
        }

        if !self.ground_height.is_finite() {
            self.ground_height = defaults.ground_height;
        }
        if !self.character_baseline_offset.is_finite() {
            self.character_baseline_offset = defaults.character_baseline_offset;
        }
        if !self.obstacle_baseline_offset.is_finite() {
            self.obstacle_baseline_offset = defaults.obstacle_baseline_offset;
        }

        self
    }
}
