//! Renderer seam
//!
//! GPU work happens outside the engine. Once per display refresh the engine
//! hands the renderer a read-only view of the object graph and the camera
//! values captured for that frame; the renderer draws every visible drawable
//! in draw order with its parameter set.

mod renderer;
#[cfg(test)]
pub(crate) mod mock_renderer;

pub use renderer::{Renderer, RendererStats};
