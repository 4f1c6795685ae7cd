//! Scene state module
//!
//! Provides the object graph handed to the renderer (parameter sets and
//! drawables in slot-map arenas) and the SceneState that owns it together
//! with the animated subsystems.

mod object_graph;
mod scene_state;

pub use object_graph::{
    ObjectGraph, Drawable, DrawableKey, ParamsKey, RenderState,
};
pub use scene_state::{SceneState, SceneBindings};
