//! Console renderer
//!
//! Stands in for a GPU backend: packs every visible drawable's parameter set
//! into the uniform block a shader would read, and logs a one-line summary
//! once per second.

use std::time::{Duration, Instant};
use diorama_engine::diorama::Result;
use diorama_engine::diorama::render::{CameraFrame, Renderer, RendererStats};
use diorama_engine::diorama::scene::ObjectGraph;
use diorama_engine::engine_info;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

pub struct ConsoleRenderer {
    stats: RendererStats,
    window_start: Instant,
    frames_in_window: u32,
}

/// What a frame would draw, reduced to the fields the summary prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSummary {
    pub night: bool,
    pub wolf: Option<String>,
    pub drawables: usize,
    /// Uniform data the frame would upload
    pub uniform_bytes: usize,
}

impl FrameSummary {
    pub fn of(graph: &ObjectGraph) -> Self {
        let mut summary = Self {
            night: false,
            wolf: None,
            drawables: 0,
            uniform_bytes: 0,
        };
        for (drawable, params) in graph.visible_drawables() {
            let block = params.to_uniform_block();
            summary.uniform_bytes += bytemuck::bytes_of(&block).len();
            summary.drawables += 1;
            let label = drawable.label();
            if label == "night" {
                summary.night = true;
            } else if label.starts_with("wolf") && !label.ends_with("-outline") {
                summary.wolf = Some(label.to_string());
            }
        }
        summary
    }
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            stats: RendererStats::default(),
            window_start: Instant::now(),
            frames_in_window: 0,
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, graph: &ObjectGraph, camera: &CameraFrame) -> Result<()> {
        let summary = FrameSummary::of(graph);
        self.stats.frames_rendered += 1;
        self.stats.last_drawables = summary.drawables;
        self.frames_in_window += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed >= REPORT_INTERVAL {
            let fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
            engine_info!("diorama::Demo",
                "{} | orbit {:.0}° | wolf {} | {} drawables ({} uniform bytes) | {:.1} fps",
                if summary.night { "night" } else { "day" },
                camera.orbit_angle.to_degrees().rem_euclid(360.0),
                summary.wolf.as_deref().unwrap_or("-"),
                summary.drawables,
                summary.uniform_bytes,
                fps);
            self.window_start = Instant::now();
            self.frames_in_window = 0;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.stats.viewport = (width, height);
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}
