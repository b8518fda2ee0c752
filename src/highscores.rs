//! High score persistence
//!
//! A single best score, read once at startup and written back only when beaten.

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from storage. Missing, corrupt or unreadable values count as zero.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score read failed: {}", e);
                Self::default()
            }
        }
    }

    /// Record a finished run's score. Persists and returns true only when it
    /// beats the stored best.
    pub fn record<S: KeyValueStore>(&mut self, score: u64, store: &S) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("High score write failed: {}", e),
        }
        true
    }

    /// Raise the in-memory best without touching storage
    pub fn raise(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        true
    }

    pub fn best(&self) -> u64 {
        self.best
    }
}
