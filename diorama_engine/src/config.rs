//! Vignette configuration
//!
//! Plain structs with `Default` values matching the shipped scene. Everything
//! is checked once by [`VignetteConfig::validate`] before any object is built.

use std::ops::RangeInclusive;
use std::time::Duration;
use crate::error::{Error, Result};

/// Camera projection parameters, handed to the camera at construction and on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveConfig {
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            near: 0.1,
            far: 50.0,
        }
    }
}

/// Clamp ranges and initial values for the orbital camera control
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLimits {
    /// Allowed orbit radius
    pub radius: RangeInclusive<f32>,
    /// Allowed pitch (radians)
    pub pitch: RangeInclusive<f32>,
    /// Radius at startup
    pub initial_radius: f32,
    /// Yaw at startup (radians); this is the orbit angle the mode is derived from
    pub initial_yaw: f32,
    /// Pitch at startup (radians)
    pub initial_pitch: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            radius: 5.0..=7.0,
            pitch: -0.5..=0.5,
            initial_radius: 5.0,
            initial_yaw: 0.3,
            initial_pitch: 0.3,
        }
    }
}

impl OrbitLimits {
    /// Clamp a radius into the configured range
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.clamp(*self.radius.start(), *self.radius.end())
    }

    /// Clamp a pitch into the configured range
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(*self.pitch.start(), *self.pitch.end())
    }
}

/// Full vignette configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VignetteConfig {
    /// Flipbook frames per second
    pub fps: f32,
    /// Number of snow particles
    pub particle_count: usize,
    /// Half extent R of the particle cube; y and z wrap within [-R, R]
    pub particle_half_extent: f32,
    /// Uniform particle scale range
    pub particle_scale_range: RangeInclusive<f32>,
    /// Base particle speed range (the downward speed is halved)
    pub particle_speed_range: RangeInclusive<f32>,
    /// Outline hull inflation
    pub outline_width: f32,
    /// Scale of the inner box and the background
    pub inner_box_scale: [f32; 3],
    /// Vertical offset of every wolf frame
    pub wolf_y_offset: f32,
    /// Distance of the background plane from the origin along z
    pub background_distance: f32,
    /// Particle layout seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Camera projection
    pub perspective: PerspectiveConfig,
    /// Camera orbit clamps
    pub orbit: OrbitLimits,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            fps: 24.0 * 2.0,
            particle_count: 50,
            particle_half_extent: 1.8,
            particle_scale_range: 0.015..=0.05,
            particle_speed_range: 0.01..=0.02,
            outline_width: 0.02,
            inner_box_scale: [0.99, 0.99, 1.0],
            wolf_y_offset: -0.63,
            background_distance: 2.0,
            seed: None,
            perspective: PerspectiveConfig::default(),
            orbit: OrbitLimits::default(),
        }
    }
}

impl VignetteConfig {
    /// Reject configurations that cannot produce a coherent scene
    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(Error::InvalidConfig(format!("fps must be positive, got {}", self.fps)));
        }
        if self.particle_count == 0 {
            return Err(Error::InvalidConfig("particle_count must be at least 1".to_string()));
        }
        if !self.particle_half_extent.is_finite() || self.particle_half_extent <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "particle_half_extent must be positive, got {}",
                self.particle_half_extent
            )));
        }
        check_range("particle_scale_range", &self.particle_scale_range)?;
        check_range("particle_speed_range", &self.particle_speed_range)?;
        if *self.particle_speed_range.start() < 0.0 {
            return Err(Error::InvalidConfig(
                "particle_speed_range must not contain negative speeds".to_string(),
            ));
        }
        check_range("orbit.radius", &self.orbit.radius)?;
        check_range("orbit.pitch", &self.orbit.pitch)?;
        if self.perspective.near <= 0.0 || self.perspective.far <= self.perspective.near {
            return Err(Error::InvalidConfig(format!(
                "perspective planes must satisfy 0 < near < far, got near={} far={}",
                self.perspective.near, self.perspective.far
            )));
        }
        Ok(())
    }

    /// Flipbook timer period: 1000 / fps milliseconds, truncated to whole nanoseconds
    pub fn flipbook_period(&self) -> Result<Duration> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(Error::InvalidConfig(format!("fps must be positive, got {}", self.fps)));
        }
        let nanos = (1_000_000_000.0_f64 / self.fps as f64) as u64;
        if nanos == 0 {
            return Err(Error::InvalidConfig(format!("fps {} is too high for the timer", self.fps)));
        }
        Ok(Duration::from_nanos(nanos))
    }
}

fn check_range(name: &str, range: &RangeInclusive<f32>) -> Result<()> {
    let (start, end) = (*range.start(), *range.end());
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(Error::InvalidConfig(format!(
            "{} must be a finite, non-inverted range, got {}..={}",
            name, start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
