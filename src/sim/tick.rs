//! Simulation tick
//!
//! Advances the world by one normalized delta in a fixed order:
//! input edges -> physics -> spawn -> move/prune -> scroll -> score -> collide.
//! Nothing in here blocks or reads the wall clock.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{BodyStep, CharacterBody};
use super::collision::{Aabb, collect_coins, strike_obstacles};
use super::entity::{self, Entity};
use super::scroller::Scroller;
use super::spawner::{SpawnPattern, Spawner};
use super::state::{GameEvent, GamePhase, RunState};
use crate::tuning::Tuning;
use crate::{dt_to_ms, sanitize_dt};

/// Edge of the jump input, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEdge {
    Pressed,
    Released,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: Vec<JumpEdge>,
}

impl TickInput {
    pub fn pressed() -> Self {
        Self {
            jump: vec![JumpEdge::Pressed],
        }
    }

    pub fn released() -> Self {
        Self {
            jump: vec![JumpEdge::Released],
        }
    }
}

/// Everything the tick mutates besides the run state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub body: CharacterBody,
    /// Live coins, ordered by id
    pub coins: Vec<Entity>,
    /// Live obstacles, ordered by id
    pub obstacles: Vec<Entity>,
    pub coin_spawner: Spawner,
    pub obstacle_spawner: Spawner,
    pub scroller: Scroller,
    /// Simulation tick counter (PLAYING ticks only)
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u64,
}

impl World {
    pub fn new(tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(tuning.seed);
        let coin_spawner =
            Spawner::new(SpawnPattern::coins(&tuning), tuning.coin_interval, &mut rng);
        let obstacle_spawner =
            Spawner::new(SpawnPattern::obstacle(&tuning), tuning.obstacle_interval, &mut rng);
        Self {
            body: CharacterBody::new(&tuning),
            coins: Vec::new(),
            obstacles: Vec::new(),
            coin_spawner,
            obstacle_spawner,
            scroller: Scroller::new(&tuning),
            time_ticks: 0,
            rng,
            next_id: 1,
            tuning,
        }
    }

    /// Clear everything a previous run left behind. The RNG keeps its stream
    /// so consecutive runs differ while staying reproducible.
    pub fn reset(&mut self) {
        self.body.reset();
        self.coins.clear();
        self.obstacles.clear();
        self.coin_spawner.reset(&mut self.rng);
        self.obstacle_spawner.reset(&mut self.rng);
        self.scroller.reset();
        self.time_ticks = 0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The character's collision box
    pub fn character_box(&self) -> Aabb {
        self.body
            .bounds(self.tuning.character_x, self.tuning.character_size)
    }

    /// Place an entity directly (scripted scenarios and tests)
    pub fn insert(&mut self, kind: entity::EntityKind, pos: DVec2) -> u64 {
        let id = self.next_entity_id();
        let (size, list) = match kind {
            entity::EntityKind::Coin => (self.tuning.coin_size, &mut self.coins),
            entity::EntityKind::Obstacle => (self.tuning.obstacle_size, &mut self.obstacles),
        };
        list.push(Entity::new(id, kind, pos, size));
        id
    }
}

/// Advance the world by `dt` reference frames. Does nothing unless the run is
/// in `Playing`. One-shot notifications are appended to `events`.
pub fn tick(
    world: &mut World,
    run: &mut RunState,
    input: &TickInput,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    if run.phase != GamePhase::Playing {
        return;
    }
    let dt = sanitize_dt(dt);
    let dt_ms = dt_to_ms(dt);

    let World {
        tuning,
        body,
        coins,
        obstacles,
        coin_spawner,
        obstacle_spawner,
        scroller,
        time_ticks,
        rng,
        next_id,
    } = world;

    *time_ticks += 1;

    // Input edges, in arrival order
    for edge in &input.jump {
        match edge {
            JumpEdge::Pressed => {
                if body.jump() {
                    events.push(GameEvent::Jump);
                }
            }
            JumpEdge::Released => body.release_jump(),
        }
    }

    // Physics
    if body.integrate(dt) == BodyStep::Landed {
        events.push(GameEvent::Land);
    }

    // Spawn
    let mut alloc_id = || {
        let id = *next_id;
        *next_id += 1;
        id
    };
    coin_spawner.maybe_spawn(dt_ms, rng, &mut alloc_id, coins);
    obstacle_spawner.maybe_spawn(dt_ms, rng, &mut alloc_id, obstacles);

    // Move and prune
    entity::advance(coins, tuning.game_speed, dt);
    entity::advance(obstacles, tuning.game_speed, dt);
    scroller.advance(dt);

    if run.advance_score(dt_ms) {
        events.push(GameEvent::ScoreTick { score: run.score });
    }

    // Collide
    let character = body.bounds(tuning.character_x, tuning.character_size);

    let picked = collect_coins(&character, coins, tuning.coin_buffer);
    for _ in 0..picked.new_hits {
        let total = run.add_coin();
        events.push(GameEvent::CoinCollected { coins: total });
    }
    coins.retain(|c| !c.consumed);

    let struck = strike_obstacles(&character, obstacles, tuning.obstacle_buffer);
    if struck.new_hits > 0 && run.game_over() {
        events.push(GameEvent::GameOver {
            score: run.score,
            coins: run.coins(),
        });
    }
}
