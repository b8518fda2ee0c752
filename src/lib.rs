//! Pug Runner - a side-scrolling obstacle-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `driver`: Host-agnostic frame driver that owns start/stop
//! - `renderer`: Draw-list snapshots and the canvas painter
//! - `platform`: Browser/native platform abstraction (storage, assets, input)
//! - `audio`: Fire-and-forget sound effects
//! - `tuning`: Data-driven game balance per variant

pub mod audio;
pub mod driver;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::Driver;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::{Tuning, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Player spawn point and size
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;
    pub const PLAYER_SIZE: f32 = 48.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -10.0;
    /// Falling faster than this settles the sprite back to idle
    pub const IDLE_VELOCITY_THRESHOLD: f32 = 1.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;

    /// Scroll rates (pixels per tick)
    pub const BASE_GAME_SPEED: f32 = 3.0;
    pub const BACKGROUND_SPEED: f32 = 1.0;

    /// Ticks per run animation frame
    pub const RUN_FRAME_TICKS: u32 = 10;
}

/// Playfield size as a vector
#[inline]
pub fn playfield() -> Vec2 {
    Vec2::new(consts::PLAYFIELD_WIDTH, consts::PLAYFIELD_HEIGHT)
}
