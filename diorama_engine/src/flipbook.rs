/// Flipbook animation.
///
/// A fixed pool of pre-baked wolf frames, each a fill drawable and an outline
/// drawable. One tick shows the frame under the cursor, hides every other
/// frame and advances the cursor cyclically. Ticks come from a dedicated
/// fixed-rate timer, never from the display refresh, and the animator only
/// touches visibility flags.

use crate::error::{Error, Result};
use crate::scene::{DrawableKey, ObjectGraph};

/// Number of frames in the wolf cycle
pub const FLIPBOOK_FRAME_COUNT: usize = 16;

/// One animation frame: fill and outline share the same visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipbookFrame {
    pub primary: DrawableKey,
    pub outline: DrawableKey,
}

/// Cyclic frame selector over a fixed pool
#[derive(Debug, Clone)]
pub struct FlipbookAnimator {
    frames: Vec<FlipbookFrame>,
    /// Frame shown by the next tick
    cursor: usize,
    /// Frame shown by the last tick (None before the first tick)
    visible: Option<usize>,
    ticks: u64,
}

impl FlipbookAnimator {
    /// Create an animator over exactly `FLIPBOOK_FRAME_COUNT` frames
    ///
    /// # Errors
    ///
    /// `Error::FrameCountMismatch` for any other pool size.
    pub fn new(frames: Vec<FlipbookFrame>) -> Result<Self> {
        if frames.len() != FLIPBOOK_FRAME_COUNT {
            crate::engine_error!("diorama::Flipbook",
                "Expected {} frames, got {}", FLIPBOOK_FRAME_COUNT, frames.len());
            return Err(Error::FrameCountMismatch {
                expected: FLIPBOOK_FRAME_COUNT,
                actual: frames.len(),
            });
        }
        Ok(Self {
            frames,
            cursor: 0,
            visible: None,
            ticks: 0,
        })
    }

    /// Show the frame under the cursor, hide all others, advance the cursor.
    ///
    /// Returns the index of the frame now visible.
    pub fn tick(&mut self, graph: &mut ObjectGraph) -> usize {
        let shown = self.cursor;
        for (index, frame) in self.frames.iter().enumerate() {
            let visible = index == shown;
            graph.set_visible(frame.primary, visible);
            graph.set_visible(frame.outline, visible);
        }

        self.visible = Some(shown);
        self.ticks += 1;
        self.cursor = (self.cursor + 1) % self.frames.len();
        if self.cursor == 0 {
            crate::engine_trace!("diorama::Flipbook", "Cycle complete after {} ticks", self.ticks);
        }
        shown
    }

    /// Hide every frame (initial state)
    pub fn hide_all(&self, graph: &mut ObjectGraph) {
        for frame in &self.frames {
            graph.set_visible(frame.primary, false);
            graph.set_visible(frame.outline, false);
        }
    }

    /// Index the next tick will show; equals `ticks mod 16`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index shown by the last tick
    pub fn visible_frame(&self) -> Option<usize> {
        self.visible
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn frame(&self, index: usize) -> Option<&FlipbookFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[FlipbookFrame] {
        &self.frames
    }
}

#[cfg(test)]
#[path = "flipbook_tests.rs"]
mod tests;
