/// Mock Renderer for unit tests (no GPU required)
///
/// Records what each frame would have drawn and can be told to fail.

use crate::camera::CameraFrame;
use crate::error::{Error, Result};
use crate::renderer::{Renderer, RendererStats};
use crate::scene::ObjectGraph;

/// One submitted frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub orbit_angle: f32,
    pub visible_labels: Vec<String>,
}

impl RecordedFrame {
    pub fn shows(&self, label: &str) -> bool {
        self.visible_labels.iter().any(|l| l == label)
    }
}

#[derive(Debug, Default)]
pub struct MockRenderer {
    pub frames: Vec<RecordedFrame>,
    pub resizes: Vec<(u32, u32)>,
    pub fail_render: bool,
    pub fail_resize: bool,
    stats: RendererStats,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl Renderer for MockRenderer {
    fn render(&mut self, graph: &ObjectGraph, camera: &CameraFrame) -> Result<()> {
        if self.fail_render {
            return Err(Error::BackendError("mock render failure".to_string()));
        }
        let visible_labels: Vec<String> = graph
            .visible_drawables()
            .map(|(drawable, _)| drawable.label().to_string())
            .collect();
        self.stats.frames_rendered += 1;
        self.stats.last_drawables = visible_labels.len();
        self.frames.push(RecordedFrame {
            orbit_angle: camera.orbit_angle,
            visible_labels,
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.fail_resize {
            return Err(Error::BackendError("mock resize failure".to_string()));
        }
        self.resizes.push((width, height));
        self.stats.viewport = (width, height);
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}
