/// FrameDriver — per display refresh orchestration.
///
/// One call to `frame` runs, in order: camera update, camera capture, mode
/// resolution, mode overrides, particle step (gated by the mode), camera
/// matrices into every parameter set, render. The flipbook is not advanced
/// here; it runs on its own timer.

use std::time::Duration;
use crate::camera::{CameraFrame, OrbitCamera};
use crate::day_night::{normalize_degrees, Mode, ModeResolver};
use crate::error::Result;
use crate::renderer::Renderer;
use crate::scene::SceneState;

/// Summary of one driven frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based frame number
    pub frame: u64,
    pub mode: Mode,
    /// Orbit angle normalized to [0, 360)
    pub orbit_degrees: f32,
    pub visible_drawables: usize,
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    resolver: ModeResolver,
    running: bool,
    frames: u64,
    last_mode: Option<Mode>,
}

impl FrameDriver {
    pub fn new(resolver: ModeResolver) -> Self {
        Self {
            resolver,
            running: true,
            frames: 0,
            last_mode: None,
        }
    }

    /// Drive one display refresh. Returns `None` once stopped.
    ///
    /// # Errors
    ///
    /// Propagates renderer failures; scene state for the frame has already
    /// been updated.
    pub fn frame<C, R>(
        &mut self,
        state: &mut SceneState,
        camera: &mut C,
        elapsed: Duration,
        renderer: &mut R,
    ) -> Result<Option<FrameReport>>
    where
        C: OrbitCamera + ?Sized,
        R: Renderer + ?Sized,
    {
        if !self.running {
            return Ok(None);
        }

        camera.update(elapsed);
        let captured = CameraFrame::capture(camera);
        let resolution = self.resolver.resolve(captured.orbit_angle);

        if self.last_mode != Some(resolution.mode) {
            crate::engine_debug!("diorama::FrameDriver",
                "Mode {:?} at orbit angle {:.1}°",
                resolution.mode, normalize_degrees(captured.orbit_angle.to_degrees()));
            self.last_mode = Some(resolution.mode);
        }

        state.apply_mode(&resolution.overrides);
        state.step_particles(resolution.overrides.particles_visible);
        state.sync_camera(captured.view, captured.projection);

        if let Err(e) = renderer.render(state.graph(), &captured) {
            crate::engine_error!("diorama::FrameDriver", "Render failed: {}", e);
            return Err(e);
        }

        self.frames += 1;
        Ok(Some(FrameReport {
            frame: self.frames,
            mode: resolution.mode,
            orbit_degrees: normalize_degrees(captured.orbit_angle.to_degrees()),
            visible_drawables: state.graph().visible_count(),
        }))
    }

    /// Stop driving; later calls to `frame` are no-ops
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames driven so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Mode of the last driven frame
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(ModeResolver::default())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
