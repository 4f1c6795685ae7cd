/// Renderer trait - consumer of the object graph

use crate::camera::CameraFrame;
use crate::error::Result;
use crate::scene::ObjectGraph;

/// Counters reported by a renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Frames submitted since creation
    pub frames_rendered: u64,
    /// Drawables submitted in the last frame
    pub last_drawables: usize,
    /// Current viewport size in pixels
    pub viewport: (u32, u32),
}

/// Draws the object graph
///
/// Called from the same thread as every state mutation, after all of a
/// frame's updates have been applied.
pub trait Renderer {
    /// Draw every visible drawable in draw order
    ///
    /// # Errors
    ///
    /// `Error::BackendError` when the backend fails to submit the frame.
    fn render(&mut self, graph: &ObjectGraph, camera: &CameraFrame) -> Result<()>;

    /// Viewport resized (never called with a zero dimension)
    fn resize(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    /// Current counters
    fn stats(&self) -> RendererStats {
        RendererStats::default()
    }
}
