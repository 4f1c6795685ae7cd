/// Camera seam.
///
/// The interactive orbit control lives outside the engine. Each display
/// refresh the driver lets the camera update, then captures its orbit angle
/// and matrices once so that every consumer in that frame sees the same
/// values.

use std::time::Duration;
use glam::{Mat4, Vec3};
use crate::config::{OrbitLimits, PerspectiveConfig};

/// Orbital camera around the origin
pub trait OrbitCamera {
    /// Horizontal orbit angle (radians, any range); drives the day/night mode
    fn orbit_angle(&self) -> f32;

    /// World → view transform
    fn view_matrix(&self) -> Mat4;

    /// View → clip transform
    fn projection_matrix(&self) -> Mat4;

    /// Advance damping/easing by `elapsed`
    fn update(&mut self, _elapsed: Duration) {}

    /// Viewport width / height changed
    fn set_aspect_ratio(&mut self, aspect: f32);
}

/// Camera values captured once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub orbit_angle: f32,
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraFrame {
    pub fn capture<C: OrbitCamera + ?Sized>(camera: &C) -> Self {
        Self {
            orbit_angle: camera.orbit_angle(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }
    }
}

/// Eye position on a sphere of `radius` around the origin.
///
/// Yaw 0 looks down -z from +z; positive pitch raises the eye.
pub fn orbit_eye(radius: f32, yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}

/// Right-handed perspective projection from the configured planes
pub fn perspective(config: &PerspectiveConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(config.fov_y, aspect, config.near, config.far)
}

/// Scripted orbit with an optional constant spin
///
/// Used by tests and headless runs in place of the interactive control.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedOrbit {
    yaw: f32,
    pitch: f32,
    radius: f32,
    /// Radians per second
    spin_rate: f32,
    aspect: f32,
    perspective: PerspectiveConfig,
}

impl FixedOrbit {
    pub fn new(yaw: f32, pitch: f32, radius: f32) -> Self {
        Self {
            yaw,
            pitch,
            radius,
            spin_rate: 0.0,
            aspect: 1.0,
            perspective: PerspectiveConfig::default(),
        }
    }

    /// Start at the configured initial pose
    pub fn from_limits(limits: &OrbitLimits, perspective: PerspectiveConfig) -> Self {
        Self {
            perspective,
            ..Self::new(
                limits.initial_yaw,
                limits.clamp_pitch(limits.initial_pitch),
                limits.clamp_radius(limits.initial_radius),
            )
        }
    }

    /// Spin around the origin at `rate` radians per second
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        orbit_eye(self.radius, self.yaw, self.pitch)
    }
}

impl Default for FixedOrbit {
    fn default() -> Self {
        Self::from_limits(&OrbitLimits::default(), PerspectiveConfig::default())
    }
}

impl OrbitCamera for FixedOrbit {
    fn orbit_angle(&self) -> f32 {
        self.yaw
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        perspective(&self.perspective, self.aspect)
    }

    fn update(&mut self, elapsed: Duration) {
        self.yaw += self.spin_rate * elapsed.as_secs_f32();
    }

    fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}
