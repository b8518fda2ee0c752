//! Sound effects
//!
//! The core only ever fires sounds and forgets them. `SoundSink` is the seam:
//! Web Audio in the browser, silence (or a recorder in tests) elsewhere.

use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Jump,
    /// Difficulty went up
    LevelUp,
    /// Run ended
    GameOver,
    /// New best score
    HighScore,
}

/// Fire-and-forget sound output
pub trait SoundSink {
    fn play(&self, effect: SoundEffect);

    /// Apply volume (0.0 - 1.0); 0 silences
    fn set_volume(&mut self, _volume: f32) {}
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&self, _effect: SoundEffect) {}
}

/// Remembers what was played (headless runs and tests)
#[derive(Debug, Default)]
pub struct SoundLog {
    played: RefCell<Vec<SoundEffect>>,
}

impl SoundLog {
    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.borrow().clone()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.borrow().iter().filter(|e| **e == effect).count()
    }
}

impl SoundSink for SoundLog {
    fn play(&self, effect: SoundEffect) {
        log::trace!("sound: {:?}", effect);
        self.played.borrow_mut().push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_log_counts() {
        let sounds = SoundLog::default();
        sounds.play(SoundEffect::Jump);
        sounds.play(SoundEffect::Jump);
        sounds.play(SoundEffect::GameOver);
        assert_eq!(sounds.count(SoundEffect::Jump), 2);
        assert_eq!(sounds.played().last(), Some(&SoundEffect::GameOver));
    }
}
