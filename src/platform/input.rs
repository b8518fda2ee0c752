//! Input mapping
//!
//! The game has a single verb. Keyboard and pointer both map to it; what it
//! means (start, jump, restart) is decided by the session's phase.

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
}

impl InputEvent {
    /// Map a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(InputEvent::Jump),
            _ => None,
        }
    }

    /// Any pointer press (mouse click, touch, pen) jumps
    pub fn from_pointer_press() -> Self {
        InputEvent::Jump
    }
}
