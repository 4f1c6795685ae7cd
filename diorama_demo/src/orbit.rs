//! Damped orbital camera control
//!
//! Mouse drag moves the target yaw/pitch, the wheel moves the target radius;
//! the actual values ease toward their targets every update. Pitch and radius
//! stay within the configured limits, yaw is unbounded.

use std::time::Duration;
use diorama_engine::diorama::{OrbitLimits, PerspectiveConfig};
use diorama_engine::diorama::render::{orbit_eye, perspective, OrbitCamera};
use glam::{Mat4, Vec3};

/// Fraction of the remaining distance covered per 60 Hz frame
const EASING: f32 = 0.1;
/// Radians per dragged pixel
const ROTATE_SPEED: f32 = 0.005;
/// Radius change per wheel line
const ZOOM_SPEED: f32 = 0.25;

pub struct DampedOrbit {
    yaw: f32,
    pitch: f32,
    radius: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_radius: f32,
    limits: OrbitLimits,
    perspective: PerspectiveConfig,
    aspect: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl DampedOrbit {
    pub fn new(limits: OrbitLimits, perspective: PerspectiveConfig) -> Self {
        let yaw = limits.initial_yaw;
        let pitch = limits.clamp_pitch(limits.initial_pitch);
        let radius = limits.clamp_radius(limits.initial_radius);
        Self {
            yaw,
            pitch,
            radius,
            target_yaw: yaw,
            target_pitch: pitch,
            target_radius: radius,
            limits,
            perspective,
            aspect: 1.0,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Button press/release; the next cursor position becomes the drag origin
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.last_cursor = None;
    }

    /// Cursor moved to (x, y) in physical pixels
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let (true, Some((last_x, last_y))) = (self.dragging, self.last_cursor) {
            self.drag((x - last_x) as f32, (y - last_y) as f32);
        }
        self.last_cursor = Some((x, y));
    }

    /// Rotate the targets by a pixel delta
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.target_yaw -= dx * ROTATE_SPEED;
        self.target_pitch = self.limits.clamp_pitch(self.target_pitch + dy * ROTATE_SPEED);
    }

    /// Wheel lines; positive zooms in
    pub fn zoom(&mut self, lines: f32) {
        self.target_radius = self.limits.clamp_radius(self.target_radius - lines * ZOOM_SPEED);
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl OrbitCamera for DampedOrbit {
    fn orbit_angle(&self) -> f32 {
        self.yaw
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(orbit_eye(self.radius, self.yaw, self.pitch), Vec3::ZERO, Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        perspective(&self.perspective, self.aspect)
    }

    fn update(&mut self, elapsed: Duration) {
        // Same easing per second at any refresh rate
        let frames = elapsed.as_secs_f32() * 60.0;
        let t = 1.0 - (1.0 - EASING).powf(frames);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.radius += (self.target_radius - self.radius) * t;
    }

    fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}
