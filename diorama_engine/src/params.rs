/// Render parameter sets.
///
/// A RenderParameters is the bag of named values a shading stage reads for one
/// object: transform, color, outline width and camera matrices.
///
/// Sets are built from a shared base by copy-then-override (`derive`). Every
/// value is a plain `Copy` glam type, so a derived set never aliases its base:
/// moving one particle can't move its siblings.

use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;
use bytemuck::{Pod, Zeroable};

// ===== KEYS AND VALUES =====

/// Name of a render parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    /// World-space translation (Vec3)
    Position,
    /// Per-axis scale (Vec3)
    Scale,
    /// Fill color (Vec3 or Vec4)
    Color,
    /// Outline hull inflation (Scalar)
    LineWidth,
    /// Camera view matrix (Mat4)
    ViewMatrix,
    /// Camera projection matrix (Mat4)
    ProjectionMatrix,
}

/// A typed parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl ParamKey {
    /// Whether `value` has a type this key can hold
    pub fn accepts(&self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (ParamKey::Position, ParamValue::Vec3(_))
                | (ParamKey::Scale, ParamValue::Vec3(_))
                | (ParamKey::Color, ParamValue::Vec3(_))
                | (ParamKey::Color, ParamValue::Vec4(_))
                | (ParamKey::LineWidth, ParamValue::Scalar(_))
                | (ParamKey::ViewMatrix, ParamValue::Mat4(_))
                | (ParamKey::ProjectionMatrix, ParamValue::Mat4(_))
        )
    }
}

// ===== UNIFORM BLOCK =====

/// GPU-ready packing of a parameter set (std140-compatible, 192 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub scale: [f32; 4],
    pub color: [f32; 4],
    pub line_width: f32,
    pub _padding: [f32; 3],
}

// ===== RENDER PARAMETERS =====

/// Per-object parameter bag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderParameters {
    values: FxHashMap<ParamKey, ParamValue>,
}

impl RenderParameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared base every scene object derives from: camera matrices,
    /// unit scale, origin position
    pub fn base(view: Mat4, projection: Mat4) -> Self {
        Self::new()
            .with(ParamKey::ViewMatrix, ParamValue::Mat4(view))
            .with(ParamKey::ProjectionMatrix, ParamValue::Mat4(projection))
            .with(ParamKey::Scale, ParamValue::Vec3(Vec3::ONE))
            .with(ParamKey::Position, ParamValue::Vec3(Vec3::ZERO))
    }

    /// Copy this set and replace every key present in `overrides`.
    ///
    /// Malformed overrides (a value whose type the key can't hold) are skipped.
    pub fn derive(&self, overrides: &[(ParamKey, ParamValue)]) -> Self {
        let mut derived = self.clone();
        for (key, value) in overrides {
            derived.set(*key, *value);
        }
        derived
    }

    /// Builder-style single override
    pub fn with(mut self, key: ParamKey, value: ParamValue) -> Self {
        self.set(key, value);
        self
    }

    /// Set one value in place. Returns false (and leaves the set untouched)
    /// when the value type doesn't match the key.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> bool {
        if !key.accepts(&value) {
            crate::engine_warn!("diorama::RenderParameters",
                "Ignoring malformed override {:?} = {:?}", key, value);
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Get a raw value
    pub fn get(&self, key: ParamKey) -> Option<ParamValue> {
        self.values.get(&key).copied()
    }

    /// Whether a key is present
    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Number of keys present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // ===== TYPED ACCESSORS =====

    pub fn position(&self) -> Option<Vec3> {
        self.vec3(ParamKey::Position)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.values.insert(ParamKey::Position, ParamValue::Vec3(position));
    }

    pub fn scale(&self) -> Option<Vec3> {
        self.vec3(ParamKey::Scale)
    }

    /// Fill color, promoted to RGBA (alpha 1) when stored as RGB
    pub fn color(&self) -> Option<Vec4> {
        match self.values.get(&ParamKey::Color)? {
            ParamValue::Vec3(rgb) => Some(rgb.extend(1.0)),
            ParamValue::Vec4(rgba) => Some(*rgba),
            _ => None,
        }
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.values.insert(ParamKey::Color, ParamValue::Vec3(color));
    }

    pub fn line_width(&self) -> Option<f32> {
        match self.values.get(&ParamKey::LineWidth)? {
            ParamValue::Scalar(width) => Some(*width),
            _ => None,
        }
    }

    /// Overwrite both camera matrices
    pub fn set_camera(&mut self, view: Mat4, projection: Mat4) {
        self.values.insert(ParamKey::ViewMatrix, ParamValue::Mat4(view));
        self.values.insert(ParamKey::ProjectionMatrix, ParamValue::Mat4(projection));
    }

    fn vec3(&self, key: ParamKey) -> Option<Vec3> {
        match self.values.get(&key)? {
            ParamValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    fn mat4(&self, key: ParamKey) -> Mat4 {
        match self.values.get(&key) {
            Some(ParamValue::Mat4(m)) => *m,
            _ => Mat4::IDENTITY,
        }
    }

    /// Pack into a uniform block; missing values fall back to identity
    /// matrices, origin, unit scale, opaque white and zero line width
    pub fn to_uniform_block(&self) -> UniformBlock {
        UniformBlock {
            view: self.mat4(ParamKey::ViewMatrix).to_cols_array_2d(),
            projection: self.mat4(ParamKey::ProjectionMatrix).to_cols_array_2d(),
            position: self.position().unwrap_or(Vec3::ZERO).extend(1.0).to_array(),
            scale: self.scale().unwrap_or(Vec3::ONE).extend(0.0).to_array(),
            color: self.color().unwrap_or(Vec4::ONE).to_array(),
            line_width: self.line_width().unwrap_or(0.0),
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
