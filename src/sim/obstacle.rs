//! Obstacle lanes
//!
//! Each lane is a FIFO queue: obstacles spawn at the right edge, scroll left
//! at a shared speed, and leave from the head once fully off-screen. Since they
//! share one spawn point and one speed, they never overtake one another.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::OBSTACLE_WIDTH;

/// Which edge of the playfield a lane is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Grows up from the floor; each exit scores a point
    Bottom,
    /// Hangs down from the ceiling; extra hazard, never scores
    Top,
}

impl Lane {
    /// Whether clearing an obstacle in this lane is worth a point
    pub fn scores(&self) -> bool {
        matches!(self, Lane::Bottom)
    }
}

/// Spawn configuration for one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub lane: Lane,
    /// Spawn every `cadence` ticks
    pub cadence: u64,
    pub min_height: f32,
    pub max_height: f32,
    #[serde(default = "default_width")]
    pub width: f32,
}

fn default_width() -> f32 {
    OBSTACLE_WIDTH
}

impl LaneConfig {
    pub fn new(lane: Lane, cadence: u64, min_height: f32, max_height: f32) -> Self {
        Self {
            lane,
            cadence,
            min_height,
            max_height,
            width: OBSTACLE_WIDTH,
        }
    }
}

/// A single obstacle column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lane: Lane,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Fully scrolled past the left edge
    #[inline]
    pub fn expired(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// One lane's live obstacles, oldest first
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pub config: LaneConfig,
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleField {
    pub fn new(config: LaneConfig) -> Self {
        Self {
            config,
            obstacles: VecDeque::new(),
        }
    }

    pub fn lane(&self) -> Lane {
        self.config.lane
    }

    /// Append a new obstacle at the right edge when the cadence comes due.
    /// Returns true if one was spawned.
    pub fn spawn<R: Rng>(
        &mut self,
        frame_counter: u64,
        playfield_width: f32,
        playfield_height: f32,
        rng: &mut R,
    ) -> bool {
        if self.config.cadence == 0 || frame_counter % self.config.cadence != 0 {
            return false;
        }

        let height = self.roll_height(rng);
        let y = match self.config.lane {
            Lane::Bottom => playfield_height - height,
            Lane::Top => 0.0,
        };

        self.obstacles.push_back(Obstacle {
            x: playfield_width,
            y,
            width: self.config.width,
            height,
            lane: self.config.lane,
        });
        log::trace!(
            "{:?} lane spawned obstacle h={:.1} at frame {}",
            self.config.lane,
            height,
            frame_counter
        );
        true
    }

    fn roll_height<R: Rng>(&self, rng: &mut R) -> f32 {
        let (min, max) = (self.config.min_height, self.config.max_height);
        if max > min {
            rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Scroll every obstacle left by `speed`, on-screen or not
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Pop expired obstacles off the head. Returns how many were removed.
    pub fn recycle_expired(&mut self) -> u32 {
        let mut removed = 0;
        while self.obstacles.front().is_some_and(Obstacle::expired) {
            self.obstacles.pop_front();
            removed += 1;
        }
        removed
    }

    /// Push an obstacle directly (tests and scripted setups)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.obstacles.iter().map(Obstacle::rect).collect()
    }
}
