//! Per-frame draw list

use crate::consts::*;
use crate::sim::{GamePhase, GameSession, Lane, Rect, SpriteKey};

/// Which piece of HUD text this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Score,
    Level,
    HighScore,
    TitlePrompt,
    GameOver,
    RestartPrompt,
}

/// A line of text at a fixed canvas position
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_px: u32,
}

impl Overlay {
    fn new(kind: OverlayKind, text: String, x: f32, y: f32, font_px: u32) -> Self {
        Self {
            kind,
            text,
            x,
            y,
            font_px,
        }
    }
}

/// Obstacle rectangles for one lane
#[derive(Debug, Clone, PartialEq)]
pub struct LaneRects {
    pub lane: Lane,
    pub rects: Vec<Rect>,
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub phase: GamePhase,
    /// Background is drawn at this x and again one playfield width right of it
    pub background_x: f32,
    pub player: Rect,
    pub sprite: SpriteKey,
    pub lanes: Vec<LaneRects>,
    pub overlays: Vec<Overlay>,
}

impl DrawList {
    pub fn from_session(session: &GameSession) -> Self {
        let lanes = session
            .lanes
            .iter()
            .map(|field| LaneRects {
                lane: field.lane(),
                rects: field.rects(),
            })
            .collect();

        Self {
            phase: session.phase,
            background_x: session.background_x,
            player: session.player.body.rect(),
            sprite: session.player.sprite(session.tuning.animate_run),
            lanes,
            overlays: overlays(session),
        }
    }

    pub fn overlay(&self, kind: OverlayKind) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.kind == kind)
    }
}

fn overlays(session: &GameSession) -> Vec<Overlay> {
    let mut out = Vec::new();
    let mid = PLAYFIELD_HEIGHT / 2.0;

    if session.phase == GamePhase::Title {
        out.push(Overlay::new(
            OverlayKind::TitlePrompt,
            "Click or press SPACE to start".to_string(),
            90.0,
            mid,
            20,
        ));
        if session.tuning.persist_high_score {
            out.push(Overlay::new(
                OverlayKind::HighScore,
                format!("High Score: {}", session.high_score),
                20.0,
                30.0,
                20,
            ));
        }
        return out;
    }

    out.push(Overlay::new(
        OverlayKind::Score,
        format!("Score: {}", session.score),
        20.0,
        30.0,
        20,
    ));
    if session.tuning.leveling.is_some() {
        out.push(Overlay::new(
            OverlayKind::Level,
            format!("Level: {}", session.level),
            20.0,
            55.0,
            20,
        ));
    }
    if session.tuning.persist_high_score {
        out.push(Overlay::new(
            OverlayKind::HighScore,
            format!("High Score: {}", session.high_score),
            300.0,
            30.0,
            20,
        ));
    }

    if session.phase == GamePhase::GameOver {
        out.push(Overlay::new(
            OverlayKind::GameOver,
            "Game Over".to_string(),
            120.0,
            mid,
            40,
        ));
        out.push(Overlay::new(
            OverlayKind::RestartPrompt,
            "Click or press SPACE to restart".to_string(),
            80.0,
            mid + 40.0,
            20,
        ));
    }
    out
}
