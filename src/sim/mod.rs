//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied dt, sanitized once per tick
//! - Seeded RNG owned by the state
//! - Stable iteration order (entities in spawn order)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod arena;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use aabb::Aabb;
pub use arena::{Arena, ArenaLayout, LayoutKind, RingBand};
pub use collision::{
    circle_hits_any, circle_intersects_circle, circle_intersects_rect, move_with_walls,
    push_circle_out_of_walls, soft_separate,
};
pub use enemy::{Enemy, EnemyKind};
pub use events::{GameEvent, HitTarget};
pub use player::Player;
pub use projectile::{Projectile, Side};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wave::{WaveDirector, WaveOrder, WavePhase, WaveUpdate};
