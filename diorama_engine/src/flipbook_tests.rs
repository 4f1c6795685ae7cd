//! Unit tests for flipbook.rs

use super::*;
use crate::assets::MeshHandle;
use crate::params::RenderParameters;
use crate::scene::{Drawable, RenderState};

// ============================================================================
// Helper Functions
// ============================================================================

fn build_frames(graph: &mut ObjectGraph, count: usize) -> Vec<FlipbookFrame> {
    let params = graph.add_params(RenderParameters::new());
    (0..count)
        .map(|i| {
            let primary = graph.add_drawable(Drawable::new(
                format!("wolf{}", i), MeshHandle(i as u32), params, RenderState::solid(),
            ));
            let outline = graph.add_drawable(Drawable::new(
                format!("wolf{}-outline", i), MeshHandle(i as u32), params, RenderState::outline(),
            ));
            FlipbookFrame { primary, outline }
        })
        .collect()
}

fn visible_frames(graph: &ObjectGraph, animator: &FlipbookAnimator) -> Vec<usize> {
    animator
        .frames()
        .iter()
        .enumerate()
        .filter(|(_, f)| graph.is_visible(f.primary))
        .map(|(i, _)| i)
        .collect()
}

fn setup() -> (ObjectGraph, FlipbookAnimator) {
    let mut graph = ObjectGraph::new();
    let frames = build_frames(&mut graph, FLIPBOOK_FRAME_COUNT);
    let animator = FlipbookAnimator::new(frames).unwrap();
    animator.hide_all(&mut graph);
    (graph, animator)
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_wrong_frame_count_rejected() {
    let mut graph = ObjectGraph::new();
    let frames = build_frames(&mut graph, 15);
    assert_eq!(
        FlipbookAnimator::new(frames).unwrap_err(),
        Error::FrameCountMismatch { expected: 16, actual: 15 }
    );
}

#[test]
fn test_initial_state_shows_nothing() {
    let (graph, animator) = setup();
    assert_eq!(animator.cursor(), 0);
    assert_eq!(animator.visible_frame(), None);
    assert!(visible_frames(&graph, &animator).is_empty());
}

// ============================================================================
// TICKING
// ============================================================================

#[test]
fn test_first_tick_shows_frame_zero() {
    let (mut graph, mut animator) = setup();
    assert_eq!(animator.tick(&mut graph), 0);
    assert_eq!(animator.visible_frame(), Some(0));
    assert_eq!(animator.cursor(), 1);
    assert_eq!(visible_frames(&graph, &animator), vec![0]);
}

#[test]
fn test_sixteen_ticks_visit_every_frame_once_then_wrap() {
    let (mut graph, mut animator) = setup();

    let shown: Vec<usize> = (0..16).map(|_| animator.tick(&mut graph)).collect();
    assert_eq!(shown, (0..16).collect::<Vec<_>>());
    assert_eq!(animator.cursor(), 0);

    // tick 17
    assert_eq!(animator.tick(&mut graph), 0);
}

#[test]
fn test_exactly_one_pair_visible_after_every_tick() {
    let (mut graph, mut animator) = setup();
    for _ in 0..40 {
        let shown = animator.tick(&mut graph);
        assert_eq!(visible_frames(&graph, &animator), vec![shown]);
        let frame = animator.frame(shown).unwrap();
        assert!(graph.is_visible(frame.outline));
        assert_eq!(graph.visible_count(), 2);
    }
}

#[test]
fn test_cursor_tracks_tick_count_mod_16() {
    let (mut graph, mut animator) = setup();
    for _ in 0..48 {
        animator.tick(&mut graph);
    }
    assert_eq!(animator.tick_count(), 48);
    assert_eq!(animator.cursor(), 0);
    assert_eq!(animator.visible_frame(), Some(15));
}

#[test]
fn test_tick_does_not_touch_parameters() {
    let (mut graph, mut animator) = setup();
    let key = graph.drawable(animator.frame(0).unwrap().primary).unwrap().params();
    let before = graph.params(key).unwrap().clone();
    animator.tick(&mut graph);
    assert_eq!(graph.params(key).unwrap(), &before);
}
