//! Frame-driven spawn timing
//!
//! Time accumulates from the simulation delta (never wall-clock timers), so a
//! given seed and delta sequence always spawns the same batches.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::tuning::{IntervalRange, Tuning};

/// Accumulator that fires once `accumulated_ms` reaches `next_interval_ms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub accumulated_ms: f64,
    pub next_interval_ms: f64,
    pub range: IntervalRange,
}

impl SpawnScheduler {
    pub fn new(range: IntervalRange, rng: &mut impl Rng) -> Self {
        let mut scheduler = Self {
            accumulated_ms: 0.0,
            next_interval_ms: range.min_ms,
            range,
        };
        scheduler.reroll(rng);
        scheduler
    }

    fn reroll(&mut self, rng: &mut impl Rng) {
        let IntervalRange { min_ms, max_ms } = self.range;
        self.next_interval_ms = if max_ms > min_ms {
            rng.random_range(min_ms..=max_ms)
        } else {
            min_ms
        };
    }

    /// Add elapsed time. Returns `true` when a spawn is due; the accumulator
    /// then restarts from zero (overflow is discarded) and a new interval is rolled.
    /// A step that carries no time never spawns.
    pub fn advance(&mut self, dt_ms: f64, rng: &mut impl Rng) -> bool {
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return false;
        }
        self.accumulated_ms += dt_ms;
        if self.accumulated_ms < self.next_interval_ms {
            return false;
        }
        self.accumulated_ms = 0.0;
        self.reroll(rng);
        true
    }

    /// Clear accumulated time and roll a fresh interval
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.accumulated_ms = 0.0;
        self.reroll(rng);
    }
}

/// Layout of one spawn batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPattern {
    pub kind: EntityKind,
    pub size: DVec2,
    /// Height shared by every entity in the batch
    pub y: f64,
    /// Left edge of the first entity (right viewport edge)
    pub start_x: f64,
    /// Horizontal distance between consecutive entities
    pub spacing: f64,
    pub min_count: u32,
    pub max_count: u32,
}

impl SpawnPattern {
    /// Rows of 2 or 3 coins spaced two coin widths apart
    pub fn coins(tuning: &Tuning) -> Self {
        Self {
            kind: EntityKind::Coin,
            size: tuning.coin_size,
            y: tuning.coin_y(),
            start_x: tuning.viewport_width,
            spacing: tuning.coin_size.x * tuning.coin_spacing,
            min_count: 2,
            max_count: 3,
        }
    }

    /// A single obstacle standing on the ground
    pub fn obstacle(tuning: &Tuning) -> Self {
        Self {
            kind: EntityKind::Obstacle,
            size: tuning.obstacle_size,
            y: tuning.obstacle_y(),
            start_x: tuning.viewport_width,
            spacing: 0.0,
            min_count: 1,
            max_count: 1,
        }
    }
}

/// Scheduler plus batch layout for one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub scheduler: SpawnScheduler,
    pub pattern: SpawnPattern,
}

impl Spawner {
    pub fn new(pattern: SpawnPattern, range: IntervalRange, rng: &mut impl Rng) -> Self {
        Self {
            scheduler: SpawnScheduler::new(range, rng),
            pattern,
        }
    }

    /// Advance the timer and append a batch to `out` when one is due.
    /// `next_id` hands out unique, increasing entity IDs.
    /// Returns the number of entities spawned.
    pub fn maybe_spawn(
        &mut self,
        dt_ms: f64,
        rng: &mut impl Rng,
        next_id: &mut impl FnMut() -> u64,
        out: &mut Vec<Entity>,
    ) -> usize {
        if !self.scheduler.advance(dt_ms, rng) {
            return 0;
        }

        let p = &self.pattern;
        let count = if p.max_count > p.min_count {
            rng.random_range(p.min_count..=p.max_count)
        } else {
            p.min_count
        };

        for i in 0..count {
            let pos = DVec2::new(p.start_x + i as f64 * p.spacing, p.y);
            out.push(Entity::new(next_id(), p.kind, pos, p.size));
        }
        log::debug!("spawned {} x {:?} (next in {:.0}ms)", count, p.kind, self.scheduler.next_interval_ms);
        count as usize
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.scheduler.reset(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_interval_within_range() {
        let mut rng = rng();
        let range = IntervalRange::new(1500.0, 3000.0);
        for _ in 0..100 {
            let s = SpawnScheduler::new(range, &mut rng);
            assert!(s.next_interval_ms >= 1500.0 && s.next_interval_ms <= 3000.0);
        }
    }

    #[test]
    fn test_no_spawn_below_interval() {
        let mut rng = rng();
        let mut s = SpawnScheduler::new(IntervalRange::new(1000.0, 1000.0), &mut rng);
        assert!(!s.advance(999.0, &mut rng));
        assert!(s.advance(1.0, &mut rng));
        // Overflow is discarded
        assert_eq!(s.accumulated_ms, 0.0);
        assert!(!s.advance(999.0, &mut rng));
    }

    #[test]
    fn test_overflow_not_carried() {
        let mut rng = rng();
        let mut s = SpawnScheduler::new(IntervalRange::new(100.0, 100.0), &mut rng);
        // A huge step still yields one spawn, not several
        assert!(s.advance(1000.0, &mut rng));
        assert!(!s.advance(50.0, &mut rng));
    }

    #[test]
    fn test_zero_step_never_fires() {
        let mut rng = rng();
        let mut s = SpawnScheduler::new(IntervalRange::new(0.0, 0.0), &mut rng);
        for _ in 0..100 {
            assert!(!s.advance(0.0, &mut rng));
        }
        assert!(!s.advance(f64::NAN, &mut rng));
        assert!(s.advance(1.0, &mut rng));
    }

    #[test]
    fn test_mean_gap_converges() {
        let mut rng = rng();
        let range = IntervalRange::new(1500.0, 3000.0);
        let mut s = SpawnScheduler::new(range, &mut rng);
        let mut elapsed = 0.0;
        let mut last = 0.0;
        let mut gaps = Vec::new();
        while gaps.len() < 500 {
            elapsed += 1.0;
            if s.advance(1.0, &mut rng) {
                gaps.push(elapsed - last);
                last = elapsed;
            }
        }
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        assert!((mean - range.mean()).abs() < 100.0, "mean gap {}", mean);
    }

    #[test]
    fn test_coin_batch_layout() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut spawner = Spawner::new(
            SpawnPattern::coins(&tuning),
            IntervalRange::new(10.0, 10.0),
            &mut rng,
        );
        let mut id = 0;
        let mut next_id = || {
            id += 1;
            id
        };
        let mut out = Vec::new();
        assert_eq!(spawner.maybe_spawn(5.0, &mut rng, &mut next_id, &mut out), 0);
        let n = spawner.maybe_spawn(5.0, &mut rng, &mut next_id, &mut out);
        assert!(n == 2 || n == 3);
        assert_eq!(out.len(), n);
        for (i, coin) in out.iter().enumerate() {
            assert_eq!(coin.kind, EntityKind::Coin);
            assert_eq!(coin.pos.x, 1280.0 + i as f64 * 180.0);
            assert_eq!(coin.pos.y, tuning.coin_y());
        }
        // IDs unique and increasing
        assert!(out.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_both_batch_sizes_occur() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut spawner =
            Spawner::new(SpawnPattern::coins(&tuning), IntervalRange::new(1.0, 1.0), &mut rng);
        let mut id = 0;
        let mut next_id = || {
            id += 1;
            id
        };
        let mut seen = [false; 4];
        for _ in 0..100 {
            let mut out = Vec::new();
            let n = spawner.maybe_spawn(1.0, &mut rng, &mut next_id, &mut out);
            seen[n] = true;
        }
        assert!(seen[2] && seen[3]);
        assert!(!seen[0] && !seen[1]);
    }

    #[test]
    fn test_obstacle_is_single() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut spawner =
            Spawner::new(SpawnPattern::obstacle(&tuning), IntervalRange::new(1.0, 1.0), &mut rng);
        let mut next_id = || 7;
        let mut out = Vec::new();
        assert_eq!(spawner.maybe_spawn(1.0, &mut rng, &mut next_id, &mut out), 1);
        assert_eq!(out[0].pos, DVec2::new(1280.0, tuning.obstacle_y()));
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let range = IntervalRange::new(1500.0, 3000.0);
        let mut a_rng = rng();
        let mut b_rng = rng();
        let mut a = SpawnScheduler::new(range, &mut a_rng);
        let mut b = SpawnScheduler::new(range, &mut b_rng);
        for _ in 0..10_000 {
            assert_eq!(a.advance(16.0, &mut a_rng), b.advance(16.0, &mut b_rng));
        }
    }
}
