//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Asset readiness
//! - Input events

pub mod assets;
pub mod input;
pub mod storage;

pub use assets::AssetGate;
pub use input::InputEvent;
pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
