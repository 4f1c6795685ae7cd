/// Vignette — top-level controller.
///
/// Owns the scene, the frame driver and the flipbook timer, and merges the
/// two time sources: display refreshes (driven by the host) and flipbook
/// ticks (a fixed-rate timer started at construction, t = 0). All state
/// changes happen on the caller's thread.

use std::time::Duration;
use crate::camera::{CameraFrame, OrbitCamera};
use crate::config::VignetteConfig;
use crate::day_night::ModeResolver;
use crate::driver::{FrameDriver, FrameReport};
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::scene::SceneState;
use crate::assets::GeometryLoader;
use crate::timer::FixedTimer;

/// Counts produced by `Vignette::run_for`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub refreshes: u64,
}

#[derive(Debug)]
pub struct Vignette {
    config: VignetteConfig,
    scene: SceneState,
    driver: FrameDriver,
    timer: FixedTimer,
    /// Latest time processed on the vignette clock
    clock: Duration,
    last_refresh: Option<Duration>,
}

impl Vignette {
    /// Validate the configuration, load every asset, build the scene and
    /// start the flipbook timer at t = 0.
    ///
    /// # Errors
    ///
    /// `InvalidConfig`, `AssetNotFound` or `FrameCountMismatch`; nothing is
    /// left running on failure.
    pub fn new<L, C>(config: VignetteConfig, loader: &mut L, camera: &mut C) -> Result<Self>
    where
        L: GeometryLoader + ?Sized,
        C: OrbitCamera + ?Sized,
    {
        if let Err(e) = config.validate() {
            crate::engine_error!("diorama::Vignette", "Rejected configuration: {}", e);
            return Err(e);
        }
        let mut timer = FixedTimer::new(config.flipbook_period()?)?;

        let captured = CameraFrame::capture(camera);
        let mut scene = SceneState::build(&config, loader, captured.view, captured.projection)?;

        let resolver = ModeResolver::new(config.background_distance);
        scene.apply_mode(&resolver.resolve(captured.orbit_angle).overrides);

        timer.start(Duration::ZERO);
        crate::engine_info!("diorama::Vignette",
            "Vignette ready: {} fps flipbook ({:?} period), {} particles",
            config.fps, timer.period(), scene.particles().len());

        Ok(Self {
            config,
            scene,
            driver: FrameDriver::new(resolver),
            timer,
            clock: Duration::ZERO,
            last_refresh: None,
        })
    }

    /// Display refresh at `now`: one driven frame. No-op after shutdown.
    pub fn display_refresh<C, R>(
        &mut self,
        now: Duration,
        camera: &mut C,
        renderer: &mut R,
    ) -> Result<Option<FrameReport>>
    where
        C: OrbitCamera + ?Sized,
        R: Renderer + ?Sized,
    {
        let elapsed = match self.last_refresh {
            Some(last) => now.saturating_sub(last),
            None => now,
        };
        self.last_refresh = Some(now);
        self.clock = self.clock.max(now);
        self.driver.frame(&mut self.scene, camera, elapsed, renderer)
    }

    /// Fire every flipbook tick due at `now`, returning how many fired
    pub fn poll_timer(&mut self, now: Duration) -> u32 {
        self.clock = self.clock.max(now);
        let mut fired = 0;
        while self.timer.pop_due(now) {
            self.scene.tick_flipbook();
            fired += 1;
        }
        fired
    }

    /// Deadline of the next flipbook tick; `None` after shutdown
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.timer.next_deadline()
    }

    /// Advance the vignette clock by `duration` in simulated time, with a
    /// display refresh every `refresh_period`.
    ///
    /// Events run in deadline order; when a refresh and a tick share a
    /// deadline, the tick runs first.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a zero refresh period; renderer failures stop the
    /// run and propagate.
    pub fn run_for<C, R>(
        &mut self,
        duration: Duration,
        refresh_period: Duration,
        camera: &mut C,
        renderer: &mut R,
    ) -> Result<RunSummary>
    where
        C: OrbitCamera + ?Sized,
        R: Renderer + ?Sized,
    {
        if refresh_period.is_zero() {
            return Err(Error::InvalidConfig("refresh period must be non-zero".to_string()));
        }

        let end = self.clock + duration;
        let mut next_refresh = self.clock + refresh_period;
        let mut summary = RunSummary::default();

        loop {
            let tick = self.timer.next_deadline().filter(|&t| t <= end);
            let refresh = Some(next_refresh).filter(|&r| r <= end && self.driver.is_running());

            match (tick, refresh) {
                (Some(t), r) if r.map_or(true, |r| t <= r) => {
                    summary.ticks += u64::from(self.poll_timer(t));
                }
                (_, Some(r)) => {
                    self.display_refresh(r, camera, renderer)?;
                    summary.refreshes += 1;
                    next_refresh += refresh_period;
                }
                _ => break,
            }
        }

        self.clock = end;
        crate::engine_trace!("diorama::Vignette",
            "Ran {:?}: {} ticks, {} refreshes", duration, summary.ticks, summary.refreshes);
        Ok(summary)
    }

    /// Cancel the flipbook timer and stop the frame driver
    pub fn shutdown(&mut self) {
        if !self.is_running() {
            return;
        }
        self.timer.cancel();
        self.driver.stop();
        crate::engine_info!("diorama::Vignette",
            "Shutdown after {} frames, {} flipbook ticks",
            self.driver.frame_count(), self.timer.fired_count());
    }

    /// Forward a viewport change; zero-sized viewports are ignored
    pub fn resize<C, R>(&mut self, width: u32, height: u32, camera: &mut C, renderer: &mut R) -> Result<()>
    where
        C: OrbitCamera + ?Sized,
        R: Renderer + ?Sized,
    {
        if width == 0 || height == 0 {
            crate::engine_debug!("diorama::Vignette", "Ignoring {}x{} viewport", width, height);
            return Ok(());
        }
        camera.set_aspect_ratio(width as f32 / height as f32);
        renderer.resize(width, height)?;
        crate::engine_info!("diorama::Vignette", "Viewport resized to {}x{}", width, height);
        Ok(())
    }

    /// Whether either time source is still active
    pub fn is_running(&self) -> bool {
        self.driver.is_running() || self.timer.is_running()
    }

    pub fn config(&self) -> &VignetteConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn timer(&self) -> &FixedTimer {
        &self.timer
    }

    /// Latest time processed
    pub fn clock(&self) -> Duration {
        self.clock
    }
}

#[cfg(test)]
#[path = "vignette_tests.rs"]
mod tests;
