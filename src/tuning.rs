//! Data-driven game balance
//!
//! Three presets track how the game grew: a bare obstacle dodger, the same with
//! a run animation, and the full game with a title screen, a ceiling lane,
//! levels, a saved high score and a randomized jump. Presets can also be
//! loaded from JSON for experimentation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BACKGROUND_SPEED, BASE_GAME_SPEED};
use crate::sim::obstacle::{Lane, LaneConfig};

/// Which iteration of the game to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    Animated,
    #[default]
    Advanced,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Animated => "Animated",
            Variant::Advanced => "Advanced",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "basic" => Some(Variant::Classic),
            "animated" => Some(Variant::Animated),
            "advanced" | "full" => Some(Variant::Advanced),
            _ => None,
        }
    }
}

/// Difficulty leveling driven by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leveling {
    /// Level up every time score hits a multiple of this
    pub points_per_level: u64,
    /// Highest reachable level
    pub level_cap: u32,
    /// Game speed multiplier applied per level-up
    pub speed_factor: f32,
}

impl Default for Leveling {
    fn default() -> Self {
        // speed_factor is the shipped value; it compounds to 10^(level-1)
        Self {
            points_per_level: 20,
            level_cap: 30,
            speed_factor: 10.0,
        }
    }
}

/// Balance knobs for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    /// Wait on a title screen before the first run
    pub title_screen: bool,
    /// Obstacle lanes, processed in order each tick
    pub lanes: Vec<LaneConfig>,
    /// Obstacle scroll speed at level 1
    pub base_speed: f32,
    pub background_speed: f32,
    #[serde(default)]
    pub leveling: Option<Leveling>,
    /// Random extra on each jump, drawn from [-jump_boost, jump_boost]
    #[serde(default)]
    pub jump_boost: f32,
    #[serde(default)]
    pub persist_high_score: bool,
    /// Flip between the two run frames while running
    #[serde(default)]
    pub animate_run: bool,
}

/// Tuning failed to parse or validate
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{lane:?} lane has zero spawn cadence")]
    ZeroCadence { lane: Lane },
    #[error("{lane:?} lane height range [{min}, {max}] is invalid")]
    HeightRange { lane: Lane, min: f32, max: f32 },
    #[error("{lane:?} lane obstacle width must be positive")]
    Width { lane: Lane },
    #[error("at least one bottom lane is required")]
    NoBottomLane,
    #[error("speeds must be positive")]
    Speed,
    #[error("level cap and points per level must be non-zero, speed factor positive")]
    Leveling,
}

impl Tuning {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Animated => Self::animated(),
            Variant::Advanced => Self::advanced(),
        }
    }

    fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            title_screen: false,
            lanes: vec![LaneConfig::new(Lane::Bottom, 100, 50.0, 250.0)],
            base_speed: BASE_GAME_SPEED,
            background_speed: BACKGROUND_SPEED,
            leveling: None,
            jump_boost: 0.0,
            persist_high_score: false,
            animate_run: false,
        }
    }

    fn animated() -> Self {
        Self {
            variant: Variant::Animated,
            animate_run: true,
            ..Self::classic()
        }
    }

    fn advanced() -> Self {
        Self {
            variant: Variant::Advanced,
            title_screen: true,
            lanes: vec![
                LaneConfig::new(Lane::Bottom, 100, 150.0, 350.0),
                LaneConfig::new(Lane::Top, 120, 120.0, 270.0),
            ],
            base_speed: BASE_GAME_SPEED,
            background_speed: BACKGROUND_SPEED,
            leveling: Some(Leveling::default()),
            jump_boost: 2.0,
            persist_high_score: true,
            animate_run: true,
        }
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for lane in &self.lanes {
            if lane.cadence == 0 {
                return Err(TuningError::ZeroCadence { lane: lane.lane });
            }
            if !(lane.min_height >= 0.0 && lane.min_height <= lane.max_height) {
                return Err(TuningError::HeightRange {
                    lane: lane.lane,
                    min: lane.min_height,
                    max: lane.max_height,
                });
            }
            if lane.width <= 0.0 {
                return Err(TuningError::Width { lane: lane.lane });
            }
        }
        if !self.lanes.iter().any(|l| l.lane == Lane::Bottom) {
            return Err(TuningError::NoBottomLane);
        }
        if self.base_speed <= 0.0 || self.background_speed <= 0.0 {
            return Err(TuningError::Speed);
        }
        if let Some(leveling) = &self.leveling {
            if leveling.level_cap == 0
                || leveling.points_per_level == 0
                || !(leveling.speed_factor.is_finite() && leveling.speed_factor > 0.0)
            {
                return Err(TuningError::Leveling);
            }
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}
