/// ObjectGraph — every parameter set and drawable in the vignette.
///
/// Uses SlotMaps for stable keys. Parameter sets are stored separately from
/// drawables so that several drawables can share one set (the day and night
/// dioramas share their fill color, both outlines share the outline color).
/// Drawables keep their insertion order, which is the draw order.

use bitflags::bitflags;
use glam::Mat4;
use slotmap::{new_key_type, SlotMap};
use crate::assets::MeshHandle;
use crate::params::RenderParameters;

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable key for a RenderParameters set within an ObjectGraph
    pub struct ParamsKey;

    /// Stable key for a Drawable within an ObjectGraph
    pub struct DrawableKey;
}

// ===== RENDER STATE =====

bitflags! {
    /// Per-drawable render state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderState: u32 {
        /// Drawable is submitted this frame
        const VISIBLE              = 1 << 0;
        /// Depth test enabled
        const DEPTH_TEST           = 1 << 1;
        /// Backface culling enabled
        const CULLING              = 1 << 2;
        /// Clockwise winding is the front face (counter-clockwise otherwise)
        const CLOCKWISE_FRONT_FACE = 1 << 3;
    }
}

impl RenderState {
    /// Visible, depth tested, culled, counter-clockwise front face
    pub fn solid() -> Self {
        RenderState::VISIBLE | RenderState::DEPTH_TEST | RenderState::CULLING
    }

    /// Like `solid` but with clockwise front face, so the back faces of the
    /// inflated hull draw as the outline
    pub fn outline() -> Self {
        Self::solid() | RenderState::CLOCKWISE_FRONT_FACE
    }
}

// ===== DRAWABLE =====

/// One draw call: mesh + parameter set + render state
#[derive(Debug, Clone)]
pub struct Drawable {
    label: String,
    mesh: MeshHandle,
    params: ParamsKey,
    state: RenderState,
}

impl Drawable {
    pub fn new(label: impl Into<String>, mesh: MeshHandle, params: ParamsKey, state: RenderState) -> Self {
        Self {
            label: label.into(),
            mesh,
            params,
            state,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn params(&self) -> ParamsKey {
        self.params
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.contains(RenderState::VISIBLE)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.state.set(RenderState::VISIBLE, visible);
    }

    pub fn set_clockwise_front_face(&mut self, clockwise: bool) {
        self.state.set(RenderState::CLOCKWISE_FRONT_FACE, clockwise);
    }
}

// ===== OBJECT GRAPH =====

/// Arena owning every parameter set and drawable
#[derive(Debug, Default)]
pub struct ObjectGraph {
    params: SlotMap<ParamsKey, RenderParameters>,
    drawables: SlotMap<DrawableKey, Drawable>,
    draw_order: Vec<DrawableKey>,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a parameter set, returning its key
    pub fn add_params(&mut self, params: RenderParameters) -> ParamsKey {
        self.params.insert(params)
    }

    pub fn params(&self, key: ParamsKey) -> Option<&RenderParameters> {
        self.params.get(key)
    }

    pub fn params_mut(&mut self, key: ParamsKey) -> Option<&mut RenderParameters> {
        self.params.get_mut(key)
    }

    /// Store a drawable at the end of the draw order
    pub fn add_drawable(&mut self, drawable: Drawable) -> DrawableKey {
        let key = self.drawables.insert(drawable);
        self.draw_order.push(key);
        key
    }

    pub fn drawable(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    pub fn drawable_mut(&mut self, key: DrawableKey) -> Option<&mut Drawable> {
        self.drawables.get_mut(key)
    }

    /// Set a drawable's visibility. Returns false if the key is invalid.
    pub fn set_visible(&mut self, key: DrawableKey, visible: bool) -> bool {
        match self.drawables.get_mut(key) {
            Some(drawable) => {
                drawable.set_visible(visible);
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, key: DrawableKey) -> bool {
        self.drawables.get(key).is_some_and(Drawable::is_visible)
    }

    /// Iterate drawables in draw order
    pub fn drawables(&self) -> impl Iterator<Item = (DrawableKey, &Drawable)> {
        self.draw_order
            .iter()
            .filter_map(move |&key| self.drawables.get(key).map(|d| (key, d)))
    }

    /// Iterate visible drawables in draw order, paired with their parameters
    pub fn visible_drawables(&self) -> impl Iterator<Item = (&Drawable, &RenderParameters)> {
        self.drawables()
            .filter(|(_, d)| d.is_visible())
            .filter_map(move |(_, d)| self.params.get(d.params()).map(|p| (d, p)))
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn params_count(&self) -> usize {
        self.params.len()
    }

    pub fn visible_count(&self) -> usize {
        self.drawables.values().filter(|d| d.is_visible()).count()
    }

    /// Refresh camera matrices in every parameter set
    pub fn sync_camera(&mut self, view: Mat4, projection: Mat4) {
        for params in self.params.values_mut() {
            params.set_camera(view, projection);
        }
    }
}
