//! One-time asset readiness gate
//!
//! The loop must not start until every image/sound has settled. A failed
//! asset still settles: it is drawn as a placeholder instead of stalling.

/// Counts settled assets against the expected total
#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    expected: usize,
    loaded: usize,
    failed: usize,
}

impl AssetGate {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            loaded: 0,
            failed: 0,
        }
    }

    /// Returns true on the call that opens the gate
    pub fn mark_loaded(&mut self) -> bool {
        self.settle(|gate| gate.loaded += 1)
    }

    /// Returns true on the call that opens the gate
    pub fn mark_failed(&mut self) -> bool {
        self.settle(|gate| gate.failed += 1)
    }

    fn settle(&mut self, bump: impl FnOnce(&mut Self)) -> bool {
        let was_ready = self.is_ready();
        bump(self);
        !was_ready && self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.loaded + self.failed >= self.expected
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_once() {
        let mut gate = AssetGate::new(3);
        assert!(!gate.is_ready());
        assert!(!gate.mark_loaded());
        assert!(!gate.mark_failed());
        assert!(gate.mark_loaded());
        assert!(gate.is_ready());
        // Late duplicates never reopen it
        assert!(!gate.mark_loaded());
        assert_eq!(gate.failed(), 1);
    }

    #[test]
    fn test_empty_gate_is_open() {
        assert!(AssetGate::new(0).is_ready());
    }
}
