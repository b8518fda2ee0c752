//! Game session and core simulation types
//!
//! A `GameSession` owns everything one run needs. The only value that outlives
//! a run is `high_score`, which the driver seeds from storage.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationState, RunCycle, SpriteKey};
use super::obstacle::{Lane, ObstacleField};
use super::physics::Body;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the title screen for the first jump
    Title,
    /// Active gameplay
    Playing,
    /// Run ended; next jump restarts
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Left the playfield through the floor or ceiling
    OutOfBounds,
    /// Hit an obstacle in the given lane
    Collision(Lane),
}

/// Things the host may want to react to (sound, storage, logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Title screen dismissed
    Started,
    Jumped,
    Restarted,
    ObstacleCleared { lane: Lane, score: u64 },
    LevelUp { level: u32, speed: f32 },
    GameOver { reason: GameOverReason, score: u64 },
    NewHighScore { score: u64 },
}

/// The player-controlled pug
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub anim: AnimationState,
    pub run_cycle: RunCycle,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(
                Vec2::new(PLAYER_START_X, PLAYER_START_Y),
                Vec2::splat(PLAYER_SIZE),
            ),
            anim: AnimationState::Idle,
            run_cycle: RunCycle::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn sprite(&self, animate_run: bool) -> SpriteKey {
        SpriteKey::resolve(self.anim, &self.run_cycle, animate_run)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// One field per configured lane, in tuning order
    pub lanes: Vec<ObstacleField>,
    pub score: u64,
    pub level: u32,
    /// Best score seen, carried across restarts
    pub high_score: u64,
    /// Ticks since the run started; drives spawn cadence
    pub frame_counter: u64,
    /// Obstacle scroll speed
    pub game_speed: f32,
    /// Background scroll offset in [-width, 0]
    pub background_x: f32,
    /// Set during a tick once the run has ended, settled at tick end
    pub(crate) pending_game_over: Option<GameOverReason>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(tuning: Tuning, high_score: u64, seed: u64) -> Self {
        let phase = if tuning.title_screen {
            GamePhase::Title
        } else {
            GamePhase::Playing
        };
        let lanes = tuning
            .lanes
            .iter()
            .cloned()
            .map(ObstacleField::new)
            .collect();
        let game_speed = tuning.base_speed;

        Self {
            tuning,
            phase,
            player: Player::new(),
            lanes,
            score: 0,
            level: 1,
            high_score,
            frame_counter: 0,
            game_speed,
            background_x: 0.0,
            pending_game_over: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Restart: fresh player, empty lanes, score/level/speed/frames back to start
    pub fn reset(&mut self) {
        self.player.reset();
        for lane in &mut self.lanes {
            lane.clear();
        }
        self.score = 0;
        self.level = 1;
        self.game_speed = self.tuning.base_speed;
        self.frame_counter = 0;
        self.pending_game_over = None;
        self.phase = GamePhase::Playing;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Handle one jump input, applied immediately.
    ///
    /// Title: start playing (no impulse). Playing: jump. GameOver: restart.
    pub fn jump(&mut self) {
        match self.phase {
            GamePhase::Title => {
                self.phase = GamePhase::Playing;
                log::info!("Title dismissed, starting run");
                self.events.push(GameEvent::Started);
            }
            GamePhase::Playing => {
                let impulse = JUMP_IMPULSE + self.jump_boost();
                self.player.body.apply_impulse(impulse);
                self.player.anim = AnimationState::Running;
                self.events.push(GameEvent::Jumped);
            }
            GamePhase::GameOver => {
                self.reset();
                log::info!("Restarting (high score {})", self.high_score);
                self.events.push(GameEvent::Restarted);
            }
        }
    }

    fn jump_boost(&mut self) -> f32 {
        let boost = self.tuning.jump_boost;
        if boost > 0.0 {
            self.rng.random_range(-boost..=boost)
        } else {
            0.0
        }
    }

    /// Record that the run ended. Only the first cause in a run sticks.
    pub(crate) fn enter_game_over(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.anim = AnimationState::Hurt;
        self.pending_game_over = Some(reason);
    }

    /// Credit cleared obstacles. Leveling is checked per point so no multiple
    /// of `points_per_level` is skipped.
    pub(crate) fn award(&mut self, lane: Lane, cleared: u32) {
        if !lane.scores() {
            return;
        }
        for _ in 0..cleared {
            self.score += 1;
            self.events.push(GameEvent::ObstacleCleared {
                lane,
                score: self.score,
            });
            self.maybe_level_up();
        }
    }

    fn maybe_level_up(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(leveling) = &self.tuning.leveling else {
            return;
        };
        if self.score % leveling.points_per_level != 0 || self.level >= leveling.level_cap {
            return;
        }
        self.level += 1;
        self.game_speed *= leveling.speed_factor;
        log::info!("Level {} (speed {})", self.level, self.game_speed);
        self.events.push(GameEvent::LevelUp {
            level: self.level,
            speed: self.game_speed,
        });
    }

    /// Close out a pending game over: compare against the high score once
    pub(crate) fn settle_game_over(&mut self) {
        let Some(reason) = self.pending_game_over.take() else {
            return;
        };
        log::info!("Game over ({:?}) with score {}", reason, self.score);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    pub fn lane(&self, lane: Lane) -> Option<&ObstacleField> {
        self.lanes.iter().find(|f| f.lane() == lane)
    }

    pub fn lane_mut(&mut self, lane: Lane) -> Option<&mut ObstacleField> {
        self.lanes.iter_mut().find(|f| f.lane() == lane)
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
