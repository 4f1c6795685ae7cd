/// SceneState — the vignette's object graph plus its animated subsystems.
///
/// Construction loads every asset first, then builds the graph in draw order:
/// outer cube, inner box, background, day and night dioramas with their
/// outlines, the 16 wolf frame pairs (hidden) and the snow particles. Any
/// failure aborts the whole build and nothing is returned.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::assets::{wolf_asset_name, GeometryLoader, MeshHandle};
use crate::config::VignetteConfig;
use crate::day_night::ModeOverrides;
use crate::error::Result;
use crate::flipbook::{FlipbookAnimator, FlipbookFrame, FLIPBOOK_FRAME_COUNT};
use crate::params::{ParamKey, ParamValue, RenderParameters};
use crate::particles::ParticleField;
use super::object_graph::{Drawable, DrawableKey, ObjectGraph, ParamsKey, RenderState};

/// Keys of every non-particle object the day/night overrides touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneBindings {
    pub outer_cube: DrawableKey,
    pub outer_cube_params: ParamsKey,
    pub inner_box: DrawableKey,
    pub inner_box_params: ParamsKey,
    pub background: DrawableKey,
    pub background_params: ParamsKey,
    pub day: DrawableKey,
    pub day_outline: DrawableKey,
    pub night: DrawableKey,
    pub night_outline: DrawableKey,
    /// Fill set shared by the day and night dioramas
    pub scene_params: ParamsKey,
    /// Outline set shared by the day and night outlines
    pub outline_params: ParamsKey,
    /// Fill set shared by every wolf frame
    pub wolf_params: ParamsKey,
    /// Outline set shared by every wolf frame
    pub wolf_outline_params: ParamsKey,
}

/// Meshes resolved before any object is created
struct LoadedMeshes {
    cube: MeshHandle,
    background: MeshHandle,
    day: MeshHandle,
    night: MeshHandle,
    sphere: MeshHandle,
    wolves: Vec<MeshHandle>,
}

impl LoadedMeshes {
    fn load<L: GeometryLoader + ?Sized>(loader: &mut L) -> Result<Self> {
        let cube = loader.load("cube")?;
        let background = loader.load("bg")?;
        let day = loader.load("day")?;
        let night = loader.load("night")?;
        let sphere = loader.load("sphere")?;
        let wolves = (0..FLIPBOOK_FRAME_COUNT)
            .map(|index| loader.load(&wolf_asset_name(index)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            cube,
            background,
            day,
            night,
            sphere,
            wolves,
        })
    }
}

/// Owner of the graph, the flipbook and the particle field
#[derive(Debug)]
pub struct SceneState {
    graph: ObjectGraph,
    bindings: SceneBindings,
    flipbook: FlipbookAnimator,
    particles: ParticleField,
}

impl SceneState {
    /// Build the scene, seeding particles from `config.seed` (or OS entropy)
    pub fn build<L: GeometryLoader + ?Sized>(
        config: &VignetteConfig,
        loader: &mut L,
        view: Mat4,
        projection: Mat4,
    ) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build_with_rng(config, loader, view, projection, &mut rng)
    }

    /// Build the scene with an explicit random source
    pub fn build_with_rng<L: GeometryLoader + ?Sized, R: Rng>(
        config: &VignetteConfig,
        loader: &mut L,
        view: Mat4,
        projection: Mat4,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let meshes = LoadedMeshes::load(loader)?;

        let mut graph = ObjectGraph::new();
        let base = RenderParameters::base(view, projection);
        let white = ParamValue::Vec3(Vec3::ONE);
        let black = ParamValue::Vec3(Vec3::ZERO);
        let box_scale = ParamValue::Vec3(Vec3::from(config.inner_box_scale));

        // Outer cube is seen from inside
        let outer_cube_params = graph.add_params(base.derive(&[(ParamKey::Color, white)]));
        let outer_cube = graph.add_drawable(Drawable::new(
            "cube",
            meshes.cube,
            outer_cube_params,
            RenderState::solid() | RenderState::CLOCKWISE_FRONT_FACE,
        ));

        let inner_box_params = graph.add_params(base.derive(&[
            (ParamKey::Scale, box_scale),
            (ParamKey::Color, white),
        ]));
        let inner_box = graph.add_drawable(Drawable::new(
            "inner-box", meshes.cube, inner_box_params, RenderState::solid(),
        ));

        let background_params = graph.add_params(base.derive(&[
            (ParamKey::Position, ParamValue::Vec3(Vec3::new(0.0, 0.0, -config.background_distance))),
            (ParamKey::Scale, box_scale),
            (ParamKey::Color, white),
        ]));
        let background = graph.add_drawable(Drawable::new(
            "bg", meshes.background, background_params, RenderState::solid(),
        ));

        // Day and night share one fill set and one outline set
        let scene = base.derive(&[(ParamKey::Color, white)]);
        let outline = scene.derive(&[
            (ParamKey::LineWidth, ParamValue::Scalar(config.outline_width)),
            (ParamKey::Color, black),
        ]);
        let wolf_offset = ParamValue::Vec3(Vec3::new(0.0, config.wolf_y_offset, 0.0));
        let wolf = scene.derive(&[(ParamKey::Position, wolf_offset)]);
        let wolf_outline = outline.derive(&[(ParamKey::Position, wolf_offset)]);

        let scene_params = graph.add_params(scene);
        let outline_params = graph.add_params(outline);
        let wolf_params = graph.add_params(wolf);
        let wolf_outline_params = graph.add_params(wolf_outline);

        let day = graph.add_drawable(Drawable::new(
            "day", meshes.day, scene_params, RenderState::solid(),
        ));
        let day_outline = graph.add_drawable(Drawable::new(
            "day-outline", meshes.day, outline_params, RenderState::outline(),
        ));
        let night = graph.add_drawable(Drawable::new(
            "night", meshes.night, scene_params, RenderState::solid(),
        ));
        let night_outline = graph.add_drawable(Drawable::new(
            "night-outline", meshes.night, outline_params, RenderState::outline(),
        ));
        graph.set_visible(night, false);
        graph.set_visible(night_outline, false);

        let frames: Vec<FlipbookFrame> = meshes
            .wolves
            .iter()
            .enumerate()
            .map(|(index, &mesh)| {
                let name = wolf_asset_name(index);
                let primary = graph.add_drawable(Drawable::new(
                    name.clone(), mesh, wolf_params, RenderState::solid(),
                ));
                let outline = graph.add_drawable(Drawable::new(
                    format!("{}-outline", name), mesh, wolf_outline_params, RenderState::outline(),
                ));
                FlipbookFrame { primary, outline }
            })
            .collect();
        let flipbook = FlipbookAnimator::new(frames)?;
        flipbook.hide_all(&mut graph);

        let particles = ParticleField::spawn(&mut graph, &base, meshes.sphere, config, rng)?;

        crate::engine_info!("diorama::SceneState",
            "Scene built: {} drawables, {} parameter sets, {} particles",
            graph.drawable_count(), graph.params_count(), particles.len());

        Ok(Self {
            graph,
            bindings: SceneBindings {
                outer_cube,
                outer_cube_params,
                inner_box,
                inner_box_params,
                background,
                background_params,
                day,
                day_outline,
                night,
                night_outline,
                scene_params,
                outline_params,
                wolf_params,
                wolf_outline_params,
            },
            flipbook,
            particles,
        })
    }

    /// Write every mode-dependent color, position, winding and visibility.
    ///
    /// Particles are gated separately by `step_particles`.
    pub fn apply_mode(&mut self, overrides: &ModeOverrides) {
        let b = self.bindings;
        let graph = &mut self.graph;

        if let Some(params) = graph.params_mut(b.inner_box_params) {
            params.set_color(overrides.inner_box_color);
        }
        if let Some(params) = graph.params_mut(b.background_params) {
            params.set_color(overrides.background_color);
            params.set_position(overrides.background_position);
        }
        if let Some(background) = graph.drawable_mut(b.background) {
            background.set_clockwise_front_face(overrides.background_clockwise_front_face);
        }
        if let Some(params) = graph.params_mut(b.scene_params) {
            params.set_color(overrides.scene_color);
        }
        if let Some(params) = graph.params_mut(b.outline_params) {
            params.set_color(overrides.outline_color);
        }
        if let Some(params) = graph.params_mut(b.wolf_params) {
            params.set_color(overrides.wolf_color);
        }
        if let Some(params) = graph.params_mut(b.wolf_outline_params) {
            params.set_color(overrides.wolf_outline_color);
        }

        graph.set_visible(b.day, overrides.day_visible);
        graph.set_visible(b.day_outline, overrides.day_visible);
        graph.set_visible(b.night, overrides.night_visible);
        graph.set_visible(b.night_outline, overrides.night_visible);
    }

    /// Advance the snow by one display frame (or hide it)
    pub fn step_particles(&mut self, visible: bool) {
        self.particles.step(&mut self.graph, visible);
    }

    /// Advance the wolf flipbook by one frame, returning the frame now shown
    pub fn tick_flipbook(&mut self) -> usize {
        self.flipbook.tick(&mut self.graph)
    }

    /// Copy camera matrices into every parameter set
    pub fn sync_camera(&mut self, view: Mat4, projection: Mat4) {
        self.graph.sync_camera(view, projection);
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ObjectGraph {
        &mut self.graph
    }

    pub fn bindings(&self) -> &SceneBindings {
        &self.bindings
    }

    pub fn flipbook(&self) -> &FlipbookAnimator {
        &self.flipbook
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
