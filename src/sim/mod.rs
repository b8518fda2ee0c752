//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable lane and obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use animation::{AnimationState, RunCycle, SpriteKey};
pub use collision::{Rect, first_hit, overlaps};
pub use obstacle::{Lane, LaneConfig, Obstacle, ObstacleField};
pub use physics::Body;
pub use state::{GameEvent, GameOverReason, GamePhase, GameSession, Player};
pub use tick::tick;
