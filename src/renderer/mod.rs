//! Rendering module
//!
//! The simulation never draws. Each frame it is flattened into a `DrawList`
//! which a `RenderSink` paints however it likes (2D canvas in the browser,
//! a recorder in tests and headless runs).

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawList, LaneRects, Overlay, OverlayKind};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Something that can paint a frame
pub trait RenderSink {
    fn present(&mut self, frame: &DrawList);
}

/// Keeps the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub last: Option<DrawList>,
    pub frames: u64,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &DrawList) {
        self.last = Some(frame.clone());
        self.frames += 1;
    }
}
