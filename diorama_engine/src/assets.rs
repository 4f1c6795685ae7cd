//! Geometry loader seam
//!
//! Parsing models into vertex/index buffers is the loader's job; the scene
//! only keeps the opaque handle it returns. A missing asset is fatal at
//! startup.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};

/// Opaque handle to geometry owned by the loader/renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Resolves asset identifiers to loaded geometry
pub trait GeometryLoader {
    /// Load (or look up) the geometry for `asset`
    ///
    /// # Errors
    ///
    /// `Error::AssetNotFound` when the identifier is unknown.
    fn load(&mut self, asset: &str) -> Result<MeshHandle>;
}

/// Asset identifier for wolf frame `index` (0-based): `wolf01` ..= `wolf16`
pub fn wolf_asset_name(index: usize) -> String {
    format!("wolf{:02}", index + 1)
}

/// Every asset identifier the vignette needs
pub fn required_assets(frame_count: usize) -> Vec<String> {
    let mut names: Vec<String> = ["cube", "bg", "day", "night", "sphere"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    names.extend((0..frame_count).map(wolf_asset_name));
    names
}

/// Loader backed by a name → handle table
///
/// Used by the demo (geometry is uploaded elsewhere) and by tests.
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    meshes: FxHashMap<String, MeshHandle>,
    next_handle: u32,
    loads: usize,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that knows every identifier in `names`
    pub fn with_assets<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut loader = Self::new();
        for name in names {
            loader.register(name);
        }
        loader
    }

    /// Register an identifier, returning its handle (stable on re-registration)
    pub fn register(&mut self, name: impl Into<String>) -> MeshHandle {
        let name = name.into();
        if let Some(handle) = self.meshes.get(&name) {
            return *handle;
        }
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.meshes.insert(name, handle);
        handle
    }

    /// Number of successful `load` calls so far
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

impl GeometryLoader for InMemoryLoader {
    fn load(&mut self, asset: &str) -> Result<MeshHandle> {
        let handle = self.meshes.get(asset).copied().ok_or_else(|| {
            crate::engine_error!("diorama::Assets", "Geometry '{}' is not registered", asset);
            Error::AssetNotFound(asset.to_string())
        })?;
        self.loads += 1;
        Ok(handle)
    }
}
