//! Player body integration
//!
//! Velocity is integrated before position, once per tick, with no clamping.
//! Leaving the playfield is detected here but acted on by the tick.

use glam::Vec2;

use super::collision::Rect;

/// A falling body with vertical velocity only
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub velocity: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            velocity: 0.0,
        }
    }

    /// Advance one tick: `velocity += gravity`, then `y += velocity`
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Overwrite velocity (jumps do not accumulate)
    #[inline]
    pub fn apply_impulse(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// True once the body pokes above the top or below the bottom edge
    pub fn out_of_bounds(&self, playfield: Vec2) -> bool {
        self.pos.y + self.size.y > playfield.y || self.pos.y < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::playfield;

    fn body_at(y: f32) -> Body {
        Body::new(Vec2::new(PLAYER_START_X, y), Vec2::splat(PLAYER_SIZE))
    }

    #[test]
    fn test_velocity_updates_before_position() {
        let mut body = body_at(100.0);
        body.integrate(GRAVITY);
        // Position moved by the already-updated velocity
        assert!((body.velocity - 0.6).abs() < 1e-6);
        assert!((body.pos.y - 100.6).abs() < 1e-4);
        body.integrate(GRAVITY);
        assert!((body.velocity - 1.2).abs() < 1e-6);
        assert!((body.pos.y - 101.8).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_overwrites() {
        let mut body = body_at(300.0);
        body.velocity = 7.5;
        body.apply_impulse(JUMP_IMPULSE);
        assert_eq!(body.velocity, JUMP_IMPULSE);
        // Airborne re-jump does not stack
        body.apply_impulse(JUMP_IMPULSE);
        assert_eq!(body.velocity, JUMP_IMPULSE);
    }

    #[test]
    fn test_ceiling_exit() {
        let mut body = body_at(0.0);
        body.velocity = -1.0;
        body.integrate(GRAVITY);
        assert!((body.velocity - -0.4).abs() < 1e-6);
        assert!((body.pos.y - -0.4).abs() < 1e-6);
        assert!(body.out_of_bounds(playfield()));
    }

    #[test]
    fn test_floor_exit() {
        let resting = body_at(PLAYFIELD_HEIGHT - PLAYER_SIZE);
        assert!(!resting.out_of_bounds(playfield()));
        let below = body_at(PLAYFIELD_HEIGHT - PLAYER_SIZE + 0.5);
        assert!(below.out_of_bounds(playfield()));
    }
}
