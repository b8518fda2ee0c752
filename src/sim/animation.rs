//! Player sprite state
//!
//! Two small state machines kept apart from physics:
//! - `AnimationState`: idle / running / hurt, driven by velocity and game over
//! - `RunCycle`: elapsed ticks -> run frame index

use serde::{Deserialize, Serialize};

use crate::consts::{IDLE_VELOCITY_THRESHOLD, RUN_FRAME_TICKS};

/// What the player sprite is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Hurt,
}

impl AnimationState {
    /// Per-tick update. Hurt holds exactly while the game is over; otherwise a
    /// fast fall settles to idle and anything slower keeps the current state.
    pub fn next(self, velocity: f32, game_over: bool) -> Self {
        if game_over {
            return AnimationState::Hurt;
        }
        match self {
            // Hurt never outlives game over
            AnimationState::Hurt => AnimationState::Idle,
            _ if velocity > IDLE_VELOCITY_THRESHOLD => AnimationState::Idle,
            other => other,
        }
    }
}

/// Two-frame run cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCycle {
    elapsed: u32,
    frame: u8,
}

impl RunCycle {
    /// Advance by one tick; flips frame every `RUN_FRAME_TICKS`
    pub fn advance(&mut self) -> u8 {
        self.elapsed = self.elapsed.wrapping_add(1);
        if self.elapsed % RUN_FRAME_TICKS == 0 {
            self.frame = (self.frame + 1) % 2;
        }
        self.frame
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sprite to draw for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Idle,
    Run1,
    Run2,
    Hurt,
}

impl SpriteKey {
    pub fn resolve(state: AnimationState, cycle: &RunCycle, animate_run: bool) -> Self {
        match state {
            AnimationState::Idle => SpriteKey::Idle,
            AnimationState::Hurt => SpriteKey::Hurt,
            AnimationState::Running if !animate_run => SpriteKey::Run1,
            AnimationState::Running => {
                if cycle.frame() == 0 {
                    SpriteKey::Run1
                } else {
                    SpriteKey::Run2
                }
            }
        }
    }

    /// Asset path relative to the page
    pub fn asset_path(&self) -> &'static str {
        match self {
            SpriteKey::Idle => "./assets/pug/Pug_idle.png",
            SpriteKey::Run1 => "./assets/pug/pug_run_1.png",
            SpriteKey::Run2 => "./assets/pug/pug_run_2.png",
            SpriteKey::Hurt => "./assets/pug/pug_hit.png",
        }
    }

    pub const ALL: [SpriteKey; 4] = [
        SpriteKey::Idle,
        SpriteKey::Run1,
        SpriteKey::Run2,
        SpriteKey::Hurt,
    ];
}
