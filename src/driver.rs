//! Frame driver
//!
//! Owns the session and the run flag. The host's frame clock calls `frame`
//! while `is_running` is true; the simulation itself never schedules anything.
//! Events raised by the session are turned into sounds and storage writes here.

use crate::audio::{SoundEffect, SoundSink};
use crate::highscores::HighScore;
use crate::platform::KeyValueStore;
use crate::renderer::{DrawList, RenderSink};
use crate::sim::{GameEvent, GamePhase, GameSession, tick};
use crate::tuning::Tuning;

pub struct Driver<S: KeyValueStore, A: SoundSink> {
    session: GameSession,
    high_score: HighScore,
    store: S,
    sound: A,
    assets_ready: bool,
    running: bool,
}

impl<S: KeyValueStore, A: SoundSink> Driver<S, A> {
    pub fn new(tuning: Tuning, store: S, sound: A, seed: u64) -> Self {
        let high_score = if tuning.persist_high_score {
            HighScore::load(&store)
        } else {
            HighScore::default()
        };
        log::info!(
            "{} variant, seed {}, high score {}",
            tuning.variant.as_str(),
            seed,
            high_score.best()
        );

        Self {
            session: GameSession::new(tuning, high_score.best(), seed),
            high_score,
            store,
            sound,
            assets_ready: false,
            running: false,
        }
    }

    /// Open the one-time asset gate and start the schedule
    pub fn assets_ready(&mut self) {
        if self.assets_ready {
            return;
        }
        self.assets_ready = true;
        self.running = !self.session.is_game_over();
        log::info!("Assets ready, starting loop");
    }

    /// Whether the host should keep calling `frame`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply a jump input immediately. Returns true if this restarted a
    /// stopped loop, in which case the host must resume scheduling frames.
    pub fn jump(&mut self) -> bool {
        if !self.assets_ready {
            log::debug!("Ignoring input before assets are ready");
            return false;
        }
        let was_running = self.running;
        self.session.jump();
        self.dispatch();
        if self.session.phase == GamePhase::Playing {
            self.running = true;
        }
        !was_running && self.running
    }

    /// Run one frame: tick, render, react to events. Returns `is_running`.
    pub fn frame<R: RenderSink>(&mut self, sink: &mut R) -> bool {
        if !self.running {
            return false;
        }
        tick(&mut self.session);
        sink.present(&DrawList::from_session(&self.session));
        self.dispatch();
        self.running
    }

    fn dispatch(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Jumped => self.sound.play(SoundEffect::Jump),
                GameEvent::LevelUp { .. } => self.sound.play(SoundEffect::LevelUp),
                GameEvent::GameOver { .. } => {
                    self.running = false;
                    self.sound.play(SoundEffect::GameOver);
                }
                GameEvent::NewHighScore { score } => {
                    if self.session.tuning.persist_high_score {
                        self.high_score.record(score, &self.store);
                        self.sound.play(SoundEffect::HighScore);
                    } else {
                        self.high_score.raise(score);
                    }
                }
                GameEvent::ObstacleCleared { lane, score } => {
                    log::trace!("{:?} obstacle cleared, score {}", lane, score);
                }
                GameEvent::Started | GameEvent::Restarted => {}
            }
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundLog;
    use crate::platform::MemoryStore;
    use crate::renderer::RecordingSink;
    use crate::tuning::Variant;

    fn driver(variant: Variant) -> Driver<MemoryStore, SoundLog> {
        Driver::new(
            Tuning::preset(variant),
            MemoryStore::new(),
            SoundLog::default(),
            3,
        )
    }

    #[test]
    fn test_waits_for_assets() {
        let mut d = driver(Variant::Classic);
        let mut sink = RecordingSink::default();
        assert!(!d.frame(&mut sink));
        assert!(!d.jump());
        assert_eq!(sink.frames, 0);
        assert_eq!(d.session().frame_counter, 0);

        d.assets_ready();
        assert!(d.frame(&mut sink));
        assert_eq!(sink.frames, 1);
    }

    #[test]
    fn test_title_renders_without_ticking() {
        let mut d = driver(Variant::Advanced);
        d.assets_ready();
        let mut sink = RecordingSink::default();
        d.frame(&mut sink);
        d.frame(&mut sink);
        assert_eq!(d.session().phase, GamePhase::Title);
        assert_eq!(d.session().frame_counter, 0);
        assert_eq!(sink.frames, 2);

        d.jump();
        assert_eq!(d.session().phase, GamePhase::Playing);
        // Dismissing the title is not a jump
        assert_eq!(d.sound().count(SoundEffect::Jump), 0);
    }

    #[test]
    fn test_jump_plays_sound() {
        let mut d = driver(Variant::Classic);
        d.assets_ready();
        d.jump();
        d.jump();
        assert_eq!(d.sound().count(SoundEffect::Jump), 2);
    }

    #[test]
    fn test_game_over_stops_and_restart_resumes() {
        let mut d = driver(Variant::Classic);
        d.assets_ready();
        let mut sink = RecordingSink::default();
        d.session_mut().player.body.pos.y = -20.0;
        assert!(!d.frame(&mut sink));
        assert!(!d.is_running());
        assert_eq!(d.sound().count(SoundEffect::GameOver), 1);

        // Frames after game over do nothing
        let frames = sink.frames;
        d.frame(&mut sink);
        assert_eq!(sink.frames, frames);

        assert!(d.jump());
        assert!(d.is_running());
        assert_eq!(d.session().score, 0);
        // A jump while already running does not report a resume
        assert!(!d.jump());
    }

    #[test]
    fn test_high_score_persisted_once() {
        let store = MemoryStore::with_entry(HighScore::STORAGE_KEY, "2");
        let mut d = Driver::new(
            Tuning::preset(Variant::Advanced),
            &store,
            SoundLog::default(),
            11,
        );
        d.assets_ready();
        d.jump();
        assert_eq!(d.session().high_score, 2);

        let mut sink = RecordingSink::default();
        d.session_mut().score = 5;
        d.session_mut().player.body.pos.y = -20.0;
        d.frame(&mut sink);

        assert_eq!(d.high_score(), 5);
        assert_eq!(store.write_count(), 1);
        assert_eq!(
            store.get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("5")
        );
        assert_eq!(d.sound().count(SoundEffect::HighScore), 1);

        // A worse run leaves the store alone
        d.jump();
        d.session_mut().score = 3;
        d.session_mut().player.body.pos.y = -20.0;
        d.frame(&mut sink);
        assert_eq!(store.write_count(), 1);
        assert_eq!(d.high_score(), 5);
    }

    #[test]
    fn test_classic_does_not_touch_storage() {
        let store = MemoryStore::new();
        let mut d = Driver::new(Tuning::preset(Variant::Classic), &store, SoundLog::default(), 1);
        d.assets_ready();
        d.session_mut().score = 9;
        d.session_mut().player.body.pos.y = -20.0;
        d.frame(&mut RecordingSink::default());
        assert_eq!(store.write_count(), 0);
        assert_eq!(d.session().high_score, 9);
        assert_eq!(d.high_score(), 9);
        assert_eq!(d.sound().count(SoundEffect::HighScore), 0);

        // Still tracked in memory across restarts
        d.jump();
        d.session_mut().score = 4;
        d.session_mut().player.body.pos.y = -20.0;
        d.frame(&mut RecordingSink::default());
        assert_eq!(d.high_score(), 9);
        assert_eq!(d.session().high_score, 9);
    }
}
