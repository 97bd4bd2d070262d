//! Arena Shooter - combat simulation core for a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena, physics, waves, combat tick)
//! - `level`: Validated level descriptors and campaign ordering
//! - `tuning`: Data-driven game balance
//! - `score`: Score and run statistics
//! - `error`: Configuration errors raised at load time

pub mod error;
pub mod level;
pub mod score;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, ConfigResult};
pub use level::{Campaign, EnemyStats, LevelDescriptor, WinCondition};
pub use score::{RunResults, RunStats, ScoreKeeper};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World units per level tile
    pub const TILE_SIZE: f32 = 64.0;
    /// Border wall thickness (world units)
    pub const WALL_THICKNESS: f32 = 60.0;

    /// Fixed timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest dt accepted per tick; longer frames are simulated as this
    pub const MAX_TICK_DT: f32 = 0.5;

    /// Random obstacles placed in open arenas
    pub const OBSTACLE_COUNT: usize = 7;
    /// Ring layout size as a fraction of the arena
    pub const RING_FRACTION: f32 = 0.55;

    /// Wall push-out passes before accepting a partial result
    pub const WALL_PUSH_ITERATIONS: usize = 8;
    /// Extra clearance added when pushing out of a wall
    pub const WALL_PUSH_EPSILON: f32 = 0.5;

    /// Extra reach for player/enemy contact so resting (just separated) bodies still touch
    pub const CONTACT_REACH: f32 = 2.0;
}

/// Unit vector from `from` toward `to`, zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Sanitize a host-supplied delta time: negative or non-finite becomes zero,
/// large frame hitches are capped.
///
/// Time beyond the cap is dropped from the simulation clock, so it is
/// reported at debug level.
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    if dt > consts::MAX_TICK_DT {
        log::debug!(
            "Frame of {:.3}s capped to {:.3}s; {:.3}s of simulated time dropped",
            dt,
            consts::MAX_TICK_DT,
            dt - consts::MAX_TICK_DT
        );
        return consts::MAX_TICK_DT;
    }
    dt.max(0.0)
}
