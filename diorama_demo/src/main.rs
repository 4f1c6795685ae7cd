//! Snow-globe vignette demo
//!
//! Runs the vignette inside a winit window. Every redraw is one display
//! refresh; the flipbook timer is serviced from `about_to_wait`, which also
//! schedules the next wake-up at the timer's deadline. Frames are reported to
//! the console instead of a GPU.

mod console_renderer;
mod orbit;

use std::time::{Duration, Instant};
use diorama_engine::diorama::{Engine, Error, Result, Vignette, VignetteConfig};
use diorama_engine::diorama::log::LogSeverity;
use diorama_engine::diorama::scene::{required_assets, InMemoryLoader};
use diorama_engine::diorama::animation::FLIPBOOK_FRAME_COUNT;
use diorama_engine::{engine_bail, engine_err, engine_error, engine_info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use console_renderer::ConsoleRenderer;
use orbit::DampedOrbit;

/// Pixels per wheel line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f64 = 40.0;

struct DemoApp {
    vignette: Vignette,
    camera: DampedOrbit,
    renderer: ConsoleRenderer,
    window: Option<Window>,
    /// Vignette clock origin (t = 0 is when the flipbook timer started)
    start: Instant,
    failed: bool,
}

impl DemoApp {
    fn new() -> Result<Self> {
        let config = VignetteConfig::default();
        let mut camera = DampedOrbit::new(config.orbit.clone(), config.perspective);
        let mut loader = InMemoryLoader::with_assets(required_assets(FLIPBOOK_FRAME_COUNT));
        let vignette = Vignette::new(config, &mut loader, &mut camera)?;
        engine_info!("diorama::Demo", "Loaded {} meshes", loader.load_count());

        Ok(Self {
            vignette,
            camera,
            renderer: ConsoleRenderer::new(),
            window: None,
            start: Instant::now(),
            failed: false,
        })
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        engine_error!("diorama::Demo", "{}", error);
        self.failed = true;
        self.vignette.shutdown();
        event_loop.exit();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes().with_title("Diorama");
        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                engine_error!("diorama::Demo", "Window creation failed: {}", e);
                self.failed = true;
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        if let Err(e) = self.vignette.resize(size.width, size.height, &mut self.camera, &mut self.renderer) {
            self.fail(event_loop, e);
            return;
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                engine_info!("diorama::Demo", "Close requested, shutting down");
                self.vignette.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(e) = self.vignette.resize(size.width, size.height, &mut self.camera, &mut self.renderer) {
                    self.fail(event_loop, e);
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.camera.set_dragging(state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.camera.cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                let now = self.now();
                if let Err(e) = self.vignette.display_refresh(now, &mut self.camera, &mut self.renderer) {
                    self.fail(event_loop, e);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now();
        self.vignette.poll_timer(now);
        match self.vignette.next_timer_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(self.start + deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn run() -> Result<()> {
    Engine::set_min_severity(LogSeverity::Info);

    let event_loop = EventLoop::new()
        .map_err(|e| engine_err!("diorama::Demo", "Event loop creation failed: {}", e))?;
    // Configuration and asset errors are logged where they occur
    let mut app = DemoApp::new()?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| engine_err!("diorama::Demo", "Event loop failed: {}", e))?;
    if app.failed {
        engine_bail!("diorama::Demo", "Exited after a runtime failure");
    }
    Ok(())
}

fn main() {
    if run().is_err() {
        std::process::exit(1);
    }
}
