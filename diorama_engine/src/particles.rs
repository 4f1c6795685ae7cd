/// Snow particle field.
///
/// A fixed set of particles falling through a cube of half extent R. Each
/// particle drifts down (y) and toward the back (z) at constant per-particle
/// speeds. An axis that falls below -R is translated by 2R: the trajectory is
/// a sawtooth, velocity never changes sign and nothing is ever clamped.
///
/// Each particle owns a fill and an outline parameter set; the outline's
/// position is rewritten from the fill's position on every step.

use glam::Vec3;
use rand::Rng;
use crate::assets::MeshHandle;
use crate::config::VignetteConfig;
use crate::error::Result;
use crate::params::{ParamKey, ParamValue, RenderParameters};
use crate::scene::{Drawable, DrawableKey, ObjectGraph, ParamsKey, RenderState};

/// Translate `value` by the span width when it drops below `-half_extent`
pub fn wrap_axis(value: f32, half_extent: f32) -> f32 {
    if value < -half_extent {
        value + half_extent * 2.0
    } else {
        value
    }
}

// ===== PARTICLE =====

/// Graph handles of one particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleHandles {
    pub params: ParamsKey,
    pub outline_params: ParamsKey,
    pub mesh: DrawableKey,
    pub outline: DrawableKey,
}

/// One snow flake
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec3,
    speed_y: f32,
    speed_z: f32,
    handles: ParticleHandles,
}

impl Particle {
    pub fn new(position: Vec3, speed_y: f32, speed_z: f32, handles: ParticleHandles) -> Self {
        Self {
            position,
            speed_y,
            speed_z,
            handles,
        }
    }

    /// Integrate one step and wrap y and z into [-R, R]
    pub fn advance(&mut self, half_extent: f32) {
        self.position.y = wrap_axis(self.position.y - self.speed_y, half_extent);
        self.position.z = wrap_axis(self.position.z - self.speed_z, half_extent);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn speed_y(&self) -> f32 {
        self.speed_y
    }

    pub fn speed_z(&self) -> f32 {
        self.speed_z
    }

    pub fn handles(&self) -> &ParticleHandles {
        &self.handles
    }
}

// ===== PARTICLE FIELD =====

/// Fixed-size particle simulation
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    half_extent: f32,
    steps: u64,
}

impl ParticleField {
    /// Wrap existing particles
    pub fn from_particles(particles: Vec<Particle>, half_extent: f32) -> Self {
        Self {
            particles,
            half_extent,
            steps: 0,
        }
    }

    /// Create `config.particle_count` particles with random position, scale
    /// and speeds; each gets a fill and an outline drawable in `graph`.
    pub fn spawn<R: Rng>(
        graph: &mut ObjectGraph,
        base: &RenderParameters,
        sphere: MeshHandle,
        config: &VignetteConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let r = config.particle_half_extent;
        let mut particles = Vec::with_capacity(config.particle_count);

        for index in 0..config.particle_count {
            let position = Vec3::new(
                rng.gen_range(-r..r),
                rng.gen_range(-r..r),
                rng.gen_range(-r..r),
            );
            let scale = rng.gen_range(config.particle_scale_range.clone());
            let speed_y = rng.gen_range(config.particle_speed_range.clone()) * 0.5;
            let speed_z = rng.gen_range(config.particle_speed_range.clone());

            let fill = base.derive(&[
                (ParamKey::Position, ParamValue::Vec3(position)),
                (ParamKey::Scale, ParamValue::Vec3(Vec3::splat(scale))),
                (ParamKey::Color, ParamValue::Vec3(Vec3::ONE)),
            ]);
            let outline = fill.derive(&[
                (ParamKey::LineWidth, ParamValue::Scalar(config.outline_width)),
                (ParamKey::Color, ParamValue::Vec3(Vec3::ZERO)),
            ]);

            let params = graph.add_params(fill);
            let outline_params = graph.add_params(outline);
            let mesh = graph.add_drawable(Drawable::new(
                format!("snow{}", index), sphere, params, RenderState::solid(),
            ));
            let outline = graph.add_drawable(Drawable::new(
                format!("snow{}-outline", index), sphere, outline_params, RenderState::outline(),
            ));

            particles.push(Particle::new(position, speed_y, speed_z, ParticleHandles {
                params,
                outline_params,
                mesh,
                outline,
            }));
        }

        Ok(Self::from_particles(particles, r))
    }

    /// Advance the field by one display frame.
    ///
    /// `visible == false` hides every particle and skips integration; the
    /// field resumes from the same positions when it becomes visible again.
    pub fn step(&mut self, graph: &mut ObjectGraph, visible: bool) {
        for particle in &mut self.particles {
            let handles = particle.handles;
            graph.set_visible(handles.mesh, visible);
            graph.set_visible(handles.outline, visible);

            if !visible {
                continue;
            }

            particle.advance(self.half_extent);
            let position = particle.position;
            if let Some(params) = graph.params_mut(handles.params) {
                params.set_position(position);
            }
            if let Some(params) = graph.params_mut(handles.outline_params) {
                params.set_position(position);
            }
        }

        if visible {
            self.steps += 1;
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// Number of steps that integrated positions
    pub fn step_count(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
#[path = "particles_tests.rs"]
mod tests;
