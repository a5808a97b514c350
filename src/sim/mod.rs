//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Normalized frame deltas only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod scroller;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{BodyStep, CharacterBody};
pub use clock::SimulationClock;
pub use collision::{Aabb, CollisionReport, collect_coins, strike_obstacles};
pub use entity::{Entity, EntityKind};
pub use scroller::{ParallaxLayer, Scroller};
pub use spawner::{SpawnPattern, SpawnScheduler, Spawner};
pub use state::{CharacterId, GameEvent, GamePhase, RunState};
pub use tick::{JumpEdge, TickInput, World, tick};
