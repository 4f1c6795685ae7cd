//! Unit tests for scene_state.rs

use super::*;
use crate::assets::{required_assets, InMemoryLoader};
use crate::day_night::Mode;
use crate::error::Error;

// ============================================================================
// Helper Functions
// ============================================================================

fn full_loader() -> InMemoryLoader {
    InMemoryLoader::with_assets(required_assets(FLIPBOOK_FRAME_COUNT))
}

fn seeded_config() -> VignetteConfig {
    VignetteConfig {
        seed: Some(1234),
        ..VignetteConfig::default()
    }
}

fn build() -> SceneState {
    SceneState::build(&seeded_config(), &mut full_loader(), Mat4::IDENTITY, Mat4::IDENTITY).unwrap()
}

fn color_of(scene: &SceneState, key: ParamsKey) -> Vec3 {
    scene.graph().params(key).unwrap().color().unwrap().truncate()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_build_creates_every_object() {
    let scene = build();
    // cube, inner box, bg, day/night + outlines, 16 wolf pairs, 50 particle pairs
    assert_eq!(scene.graph().drawable_count(), 3 + 4 + 32 + 100);
    // 3 singles, 4 shared sets, 2 per particle
    assert_eq!(scene.graph().params_count(), 3 + 4 + 100);
    assert_eq!(scene.particles().len(), 50);
    assert_eq!(scene.flipbook().frames().len(), FLIPBOOK_FRAME_COUNT);
}

#[test]
fn test_build_loads_every_asset() {
    let mut loader = full_loader();
    SceneState::build(&seeded_config(), &mut loader, Mat4::IDENTITY, Mat4::IDENTITY).unwrap();
    assert_eq!(loader.load_count(), 21);
}

#[test]
fn test_initial_visibility() {
    let scene = build();
    let b = scene.bindings();
    let graph = scene.graph();

    assert!(graph.is_visible(b.outer_cube));
    assert!(graph.is_visible(b.day));
    assert!(graph.is_visible(b.day_outline));
    assert!(!graph.is_visible(b.night));
    assert!(!graph.is_visible(b.night_outline));
    for frame in scene.flipbook().frames() {
        assert!(!graph.is_visible(frame.primary));
        assert!(!graph.is_visible(frame.outline));
    }
    assert_eq!(scene.flipbook().visible_frame(), None);
}

#[test]
fn test_draw_order_starts_with_static_objects() {
    let scene = build();
    let labels: Vec<&str> = scene.graph().drawables().take(7).map(|(_, d)| d.label()).collect();
    assert_eq!(
        labels,
        vec!["cube", "inner-box", "bg", "day", "day-outline", "night", "night-outline"]
    );
}

#[test]
fn test_render_states() {
    let scene = build();
    let b = scene.bindings();
    let graph = scene.graph();

    let cube = graph.drawable(b.outer_cube).unwrap().state();
    assert!(cube.contains(RenderState::DEPTH_TEST | RenderState::CULLING | RenderState::CLOCKWISE_FRONT_FACE));
    assert!(graph.drawable(b.day_outline).unwrap().state().contains(RenderState::CLOCKWISE_FRONT_FACE));
    assert!(!graph.drawable(b.day).unwrap().state().contains(RenderState::CLOCKWISE_FRONT_FACE));
    assert!(!graph.drawable(b.background).unwrap().state().contains(RenderState::CLOCKWISE_FRONT_FACE));
}

#[test]
fn test_shared_parameter_sets() {
    let scene = build();
    let b = scene.bindings();
    let graph = scene.graph();

    assert_eq!(graph.drawable(b.day).unwrap().params(), b.scene_params);
    assert_eq!(graph.drawable(b.night).unwrap().params(), b.scene_params);
    assert_eq!(graph.drawable(b.day_outline).unwrap().params(), b.outline_params);
    assert_eq!(graph.drawable(b.night_outline).unwrap().params(), b.outline_params);
    for frame in scene.flipbook().frames() {
        assert_eq!(graph.drawable(frame.primary).unwrap().params(), b.wolf_params);
        assert_eq!(graph.drawable(frame.outline).unwrap().params(), b.wolf_outline_params);
    }
}

#[test]
fn test_parameter_values() {
    let scene = build();
    let b = scene.bindings();
    let graph = scene.graph();

    let inner = graph.params(b.inner_box_params).unwrap();
    assert_eq!(inner.scale(), Some(Vec3::new(0.99, 0.99, 1.0)));

    let bg = graph.params(b.background_params).unwrap();
    assert_eq!(bg.position(), Some(Vec3::new(0.0, 0.0, -2.0)));

    let outline = graph.params(b.outline_params).unwrap();
    assert_eq!(outline.line_width(), Some(0.02));
    assert_eq!(outline.color().unwrap().truncate(), Vec3::ZERO);

    let wolf = graph.params(b.wolf_params).unwrap();
    assert_eq!(wolf.position(), Some(Vec3::new(0.0, -0.63, 0.0)));
    let wolf_outline = graph.params(b.wolf_outline_params).unwrap();
    assert_eq!(wolf_outline.position(), Some(Vec3::new(0.0, -0.63, 0.0)));
    assert_eq!(wolf_outline.line_width(), Some(0.02));
}

// ============================================================================
// CONSTRUCTION FAILURES
// ============================================================================

#[test]
fn test_missing_static_asset_aborts() {
    let mut loader = InMemoryLoader::with_assets(["cube", "bg", "day", "sphere"]);
    let err = SceneState::build(&seeded_config(), &mut loader, Mat4::IDENTITY, Mat4::IDENTITY).unwrap_err();
    assert_eq!(err, Error::AssetNotFound("night".to_string()));
}

#[test]
fn test_missing_wolf_frame_aborts() {
    let names: Vec<String> = required_assets(FLIPBOOK_FRAME_COUNT)
        .into_iter()
        .filter(|name| name != "wolf07")
        .collect();
    let mut loader = InMemoryLoader::with_assets(names);
    let err = SceneState::build(&seeded_config(), &mut loader, Mat4::IDENTITY, Mat4::IDENTITY).unwrap_err();
    assert_eq!(err, Error::AssetNotFound("wolf07".to_string()));
}

#[test]
fn test_invalid_config_aborts_before_loading() {
    let config = VignetteConfig {
        particle_count: 0,
        ..seeded_config()
    };
    let mut loader = full_loader();
    let err = SceneState::build(&config, &mut loader, Mat4::IDENTITY, Mat4::IDENTITY).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(loader.load_count(), 0);
}

#[test]
fn test_same_seed_same_layout() {
    let a = build();
    let b = build();
    let pa: Vec<Vec3> = a.particles().particles().iter().map(|p| p.position()).collect();
    let pb: Vec<Vec3> = b.particles().particles().iter().map(|p| p.position()).collect();
    assert_eq!(pa, pb);
}

// ============================================================================
// MODE APPLICATION
// ============================================================================

#[test]
fn test_apply_night_then_day() {
    let mut scene = build();
    let b = *scene.bindings();

    scene.apply_mode(&ModeOverrides::for_mode(Mode::Night, 2.0));
    {
        let graph = scene.graph();
        assert!(!graph.is_visible(b.day) && !graph.is_visible(b.day_outline));
        assert!(graph.is_visible(b.night) && graph.is_visible(b.night_outline));
        assert!(graph.drawable(b.background).unwrap().state().contains(RenderState::CLOCKWISE_FRONT_FACE));
        assert_eq!(graph.params(b.background_params).unwrap().position(), Some(Vec3::new(0.0, 0.0, 2.0)));
    }
    assert_eq!(color_of(&scene, b.inner_box_params), Vec3::ZERO);
    assert_eq!(color_of(&scene, b.scene_params), Vec3::ZERO);
    assert_eq!(color_of(&scene, b.outline_params), Vec3::ONE);
    assert_eq!(color_of(&scene, b.wolf_params), Vec3::ZERO);
    assert_eq!(color_of(&scene, b.wolf_outline_params), Vec3::ONE);

    scene.apply_mode(&ModeOverrides::for_mode(Mode::Day, 2.0));
    let graph = scene.graph();
    assert!(graph.is_visible(b.day) && !graph.is_visible(b.night));
    assert!(!graph.drawable(b.background).unwrap().state().contains(RenderState::CLOCKWISE_FRONT_FACE));
    assert_eq!(color_of(&scene, b.scene_params), Vec3::ONE);
    assert_eq!(color_of(&scene, b.outline_params), Vec3::ZERO);
}

#[test]
fn test_apply_mode_keeps_outer_cube_white() {
    let mut scene = build();
    let key = scene.bindings().outer_cube_params;
    scene.apply_mode(&ModeOverrides::for_mode(Mode::Night, 2.0));
    assert_eq!(color_of(&scene, key), Vec3::ONE);
}

#[test]
fn test_apply_mode_does_not_touch_flipbook() {
    let mut scene = build();
    scene.tick_flipbook();
    scene.apply_mode(&ModeOverrides::for_mode(Mode::Night, 2.0));
    let frame = *scene.flipbook().frame(0).unwrap();
    assert!(scene.graph().is_visible(frame.primary));
    assert!(scene.graph().is_visible(frame.outline));
}

// ============================================================================
// CAMERA SYNC
// ============================================================================

#[test]
fn test_sync_camera_reaches_every_set() {
    let mut scene = build();
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let projection = Mat4::perspective_rh(1.0, 1.5, 0.1, 50.0);
    scene.sync_camera(view, projection);

    for (_, drawable) in scene.graph().drawables() {
        let params = scene.graph().params(drawable.params()).unwrap();
        assert_eq!(params.get(ParamKey::ViewMatrix), Some(ParamValue::Mat4(view)));
        assert_eq!(params.get(ParamKey::ProjectionMatrix), Some(ParamValue::Mat4(projection)));
    }
}
