//! Fixed-step simulation tick
//!
//! One call advances the session by exactly one frame. Order matters and is
//! fixed: background, player physics, bounds, each lane (advance, collide,
//! spawn, recycle), animation, game over settlement, frame counter.

use super::collision::first_hit;
use super::state::{GameOverReason, GamePhase, GameSession};
use crate::consts::*;
use crate::playfield;

/// Advance the session by one frame. No-op outside `Playing`.
pub fn tick(session: &mut GameSession) {
    if session.phase != GamePhase::Playing {
        return;
    }

    scroll_background(session);

    session.player.body.integrate(GRAVITY);
    if session.player.body.out_of_bounds(playfield()) {
        session.enter_game_over(GameOverReason::OutOfBounds);
    }

    update_lanes(session);

    let game_over = session.is_game_over();
    let player = &mut session.player;
    player.anim = player.anim.next(player.body.velocity, game_over);
    if session.tuning.animate_run && player.anim == super::AnimationState::Running {
        player.run_cycle.advance();
    }

    session.settle_game_over();
    session.frame_counter += 1;
}

fn scroll_background(session: &mut GameSession) {
    session.background_x -= session.tuning.background_speed;
    if session.background_x <= -PLAYFIELD_WIDTH {
        session.background_x = 0.0;
    }
}

/// Lanes run in configured order. The rest of the tick still plays out after
/// a hit; only the first cause is kept.
fn update_lanes(session: &mut GameSession) {
    let player_rect = session.player.body.rect();
    let speed = session.game_speed;
    let frame = session.frame_counter;

    for i in 0..session.lanes.len() {
        let field = &mut session.lanes[i];
        let lane = field.lane();

        field.advance(speed);
        let hit = first_hit(&player_rect, &field.rects()).is_some();
        field.spawn(frame, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, &mut session.rng);
        let cleared = field.recycle_expired();

        if hit {
            log::debug!("Player hit {:?} obstacle at frame {}", lane, frame);
            session.enter_game_over(GameOverReason::Collision(lane));
        }
        session.award(lane, cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{Lane, Obstacle};
    use crate::sim::state::GameEvent;
    use crate::sim::AnimationState;
    use crate::tuning::{Tuning, Variant};

    fn classic() -> GameSession {
        GameSession::new(Tuning::preset(Variant::Classic), 0, 12345)
    }

    /// Cancel gravity for the next tick so the player hovers in place
    fn hover(session: &mut GameSession) {
        session.player.body.velocity = -GRAVITY;
    }

    #[test]
    fn test_first_obstacle_scrolls_at_game_speed() {
        let mut s = classic();
        for _ in 0..100 {
            hover(&mut s);
            tick(&mut s);
        }
        assert_eq!(s.phase, GamePhase::Playing);
        let lane = s.lane(Lane::Bottom).unwrap();
        assert_eq!(lane.len(), 1);
        // Spawned on frame 0, moved on frames 1..=99
        assert!((lane.iter().next().unwrap().x - 183.0).abs() < 1e-3);

        hover(&mut s);
        tick(&mut s);
        let lane = s.lane(Lane::Bottom).unwrap();
        let xs: Vec<f32> = lane.iter().map(|o| o.x).collect();
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 180.0).abs() < 1e-3);
        assert_eq!(xs[1], PLAYFIELD_WIDTH);
        assert_eq!(s.frame_counter, 101);
    }

    #[test]
    fn test_ceiling_exit_ends_game() {
        let mut s = classic();
        s.player.body.pos.y = 0.0;
        s.player.body.velocity = -1.0;
        tick(&mut s);
        assert!((s.player.body.velocity - -0.4).abs() < 1e-6);
        assert!((s.player.body.pos.y - -0.4).abs() < 1e-6);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.anim, AnimationState::Hurt);
        assert!(s.drain_events().contains(&GameEvent::GameOver {
            reason: GameOverReason::OutOfBounds,
            score: 0
        }));
    }

    #[test]
    fn test_falling_eventually_hits_floor() {
        let mut s = classic();
        let mut ticks = 0;
        while s.phase == GamePhase::Playing && ticks < 1000 {
            tick(&mut s);
            ticks += 1;
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.player.body.pos.y + PLAYER_SIZE > PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_collision_ends_game() {
        let mut s = classic();
        // Place an obstacle that will overlap the player after advancing
        s.lanes[0].push(Obstacle {
            x: PLAYER_START_X + 10.0,
            y: 0.0,
            width: OBSTACLE_WIDTH,
            height: PLAYFIELD_HEIGHT,
            lane: Lane::Bottom,
        });
        hover(&mut s);
        tick(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            reason: GameOverReason::Collision(Lane::Bottom),
            score: 0
        }));
    }

    #[test]
    fn test_top_lane_collision_ends_game() {
        let mut s = GameSession::new(Tuning::preset(Variant::Advanced), 0, 5);
        s.jump();
        s.frame_counter = 3;
        // Hangs from the ceiling down past the player's top edge
        let game_speed = s.game_speed;
        s.lane_mut(Lane::Top).unwrap().push(Obstacle {
            x: PLAYER_START_X + game_speed,
            y: 0.0,
            width: OBSTACLE_WIDTH,
            height: PLAYER_START_Y + 10.0,
            lane: Lane::Top,
        });
        hover(&mut s);
        tick(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::Started,
                GameEvent::GameOver {
                    reason: GameOverReason::Collision(Lane::Top),
                    score: 0
                },
            ]
        );
    }

    #[test]
    fn test_level_up_suppressed_on_game_over_tick() {
        let mut s = GameSession::new(Tuning::preset(Variant::Advanced), 0, 5);
        s.jump();
        s.score = 19;
        s.frame_counter = 1;
        s.lane_mut(Lane::Bottom).unwrap().push(Obstacle {
            x: -OBSTACLE_WIDTH - 10.0,
            y: 600.0,
            width: OBSTACLE_WIDTH,
            height: 40.0,
            lane: Lane::Bottom,
        });
        s.player.body.pos.y = -50.0;
        tick(&mut s);
        assert!(s.is_game_over());
        assert_eq!(s.score, 20);
        assert_eq!(s.level, 1);
        assert!(
            !s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { .. }))
        );
    }

    #[test]
    fn test_recycle_scores_only_expired_head() {
        let mut s = classic();
        s.frame_counter = 1; // off-cadence, nothing spawns
        let bottom = |x| Obstacle {
            x,
            y: 600.0,
            width: OBSTACLE_WIDTH,
            height: 40.0,
            lane: Lane::Bottom,
        };
        s.lanes[0].push(bottom(-OBSTACLE_WIDTH - 1.0 + s.game_speed));
        s.lanes[0].push(bottom(50.0 + s.game_speed));
        hover(&mut s);
        tick(&mut s);
        assert_eq!(s.score, 1);
        let xs: Vec<f32> = s.lanes[0].iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![50.0]);
    }

    #[test]
    fn test_top_lane_clear_does_not_score() {
        let mut s = GameSession::new(Tuning::preset(Variant::Advanced), 0, 5);
        s.jump();
        s.frame_counter = 7;
        s.lane_mut(Lane::Top).unwrap().push(Obstacle {
            x: -OBSTACLE_WIDTH,
            y: 0.0,
            width: OBSTACLE_WIDTH,
            height: 150.0,
            lane: Lane::Top,
        });
        hover(&mut s);
        tick(&mut s);
        assert!(s.lane(Lane::Top).unwrap().is_empty());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_no_tick_outside_playing() {
        let mut s = GameSession::new(Tuning::preset(Variant::Advanced), 0, 5);
        tick(&mut s);
        assert_eq!(s.frame_counter, 0);
        assert_eq!(s.player.body.velocity, 0.0);

        s.jump();
        s.player.body.pos.y = -100.0;
        tick(&mut s);
        assert!(s.is_game_over());
        let frames = s.frame_counter;
        tick(&mut s);
        assert_eq!(s.frame_counter, frames);
    }

    #[test]
    fn test_background_wraps() {
        let mut s = classic();
        s.background_x = -PLAYFIELD_WIDTH + 1.0;
        hover(&mut s);
        tick(&mut s);
        assert_eq!(s.background_x, 0.0);
    }

    #[test]
    fn test_high_score_settles_after_same_tick_scoring() {
        let mut s = classic();
        s.frame_counter = 1;
        s.high_score = 0;
        // Expired obstacle scores this tick while the player leaves the screen
        s.lanes[0].push(Obstacle {
            x: -OBSTACLE_WIDTH - 10.0,
            y: 600.0,
            width: OBSTACLE_WIDTH,
            height: 40.0,
            lane: Lane::Bottom,
        });
        s.player.body.pos.y = -50.0;
        tick(&mut s);
        assert!(s.is_game_over());
        assert_eq!(s.score, 1);
        assert_eq!(s.high_score, 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(Tuning::preset(Variant::Advanced), 0, 99999);
        let mut b = GameSession::new(Tuning::preset(Variant::Advanced), 0, 99999);
        for session in [&mut a, &mut b] {
            session.jump();
            for i in 0..400 {
                if i % 18 == 0 {
                    session.jump();
                }
                tick(session);
            }
        }
        assert_eq!(a.frame_counter, b.frame_counter);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.body.pos, b.player.body.pos);
        let heights = |s: &GameSession| -> Vec<f32> {
            s.lanes.iter().flat_map(|l| l.iter().map(|o| o.height)).collect()
        };
        assert_eq!(heights(&a), heights(&b));
    }
}
